pub const SERVICE_NAME: &str = "Data Validator Agent";

pub fn landing_message() -> String {
    format!("{} is running!", SERVICE_NAME)
}

/// `0.1` 顯示為 `$0.1`
pub fn format_price(price: f64) -> String {
    format!("${}", price)
}

pub const TERMS_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Terms of Service - Data Validator Agent</title>
    <style>
        body { font-family: Arial, sans-serif; max-width: 800px; margin: 50px auto; padding: 20px; }
    </style>
</head>
<body>
    <h1>Terms of Service</h1>
    <p><strong>Last updated:</strong> Feb 21, 2026</p>

    <h2>1. Service Description</h2>
    <p>Data Validator Agent provides AI-powered data validation services. It checks facts, logical errors, and misinformation for other AI agents and applications.</p>

    <h2>2. Pricing</h2>
    <p>A flat fee is charged per successful request. Payments are processed through the Skyfire protocol.</p>

    <h2>3. Usage</h2>
    <p>This service is intended for AI agents and developers. You agree not to misuse the API or attempt to reverse-engineer it.</p>

    <h2>4. Disclaimer</h2>
    <p>The service provides validation based on AI models. Accuracy is not guaranteed. Use at your own discretion.</p>

    <h2>5. Contact</h2>
    <p>Email: your-email@example.com</p>
</body>
</html>
"#;
