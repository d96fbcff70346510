/// 建立送給上游模型的固定提示，輸入原樣嵌入
pub fn build_prompt(data: &str) -> String {
    format!(
        "You are an expert data checker agent. Your task is to verify the given data.\n\
         Data: {data}\n\
         Is this data correct? If not, what is the error?\n\
         Reply only with \"CORRECT\" or \"WRONG: describe the error\"."
    )
}
