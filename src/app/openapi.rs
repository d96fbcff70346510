use crate::app::pages::{format_price, SERVICE_NAME};
use serde_json::{json, Value};

/// OpenAPI 3.0.3 document for the public surface. Only `/check` is described;
/// the landing, health, terms and webhook routes stay out of the schema.
pub fn document(price_per_request: f64, echo_price: bool) -> Value {
    let mut response_properties = json!({
        "result": {
            "type": "string",
            "title": "Result",
            "description": "Validation result (CORRECT or WRONG with explanation)"
        }
    });
    let mut required = vec!["result"];
    if echo_price {
        response_properties["price"] = json!({
            "type": "number",
            "title": "Price",
            "description": "Cost in USD"
        });
        required.push("price");
    }

    let error_response = |description: &str| {
        json!({
            "description": description,
            "content": {
                "application/json": {
                    "schema": {"$ref": "#/components/schemas/ErrorDetail"}
                }
            }
        })
    };

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": SERVICE_NAME,
            "description": format!(
                "AI agent that validates data for other AI agents. {} per request.",
                format_price(price_per_request)
            ),
            "version": env!("CARGO_PKG_VERSION")
        },
        "paths": {
            "/check": {
                "post": {
                    "summary": "Check Data",
                    "description": "Validate the provided data.",
                    "operationId": "check_data",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": {"$ref": "#/components/schemas/DataRequest"}
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "Successful Response",
                            "content": {
                                "application/json": {
                                    "schema": {"$ref": "#/components/schemas/DataResponse"}
                                }
                            }
                        },
                        "422": error_response("Validation Error"),
                        "502": error_response("AI service error"),
                        "503": error_response("AI service unavailable"),
                        "504": error_response("AI service timeout")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "DataRequest": {
                    "type": "object",
                    "title": "DataRequest",
                    "required": ["data"],
                    "properties": {
                        "data": {
                            "type": "string",
                            "title": "Data",
                            "description": "The data to validate",
                            "example": "Bitcoin price is $100,000"
                        }
                    }
                },
                "DataResponse": {
                    "type": "object",
                    "title": "DataResponse",
                    "required": required,
                    "properties": response_properties
                },
                "ErrorDetail": {
                    "type": "object",
                    "title": "ErrorDetail",
                    "required": ["detail"],
                    "properties": {
                        "detail": {"type": "string", "title": "Detail"}
                    }
                }
            }
        }
    })
}
