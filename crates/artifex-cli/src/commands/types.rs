//! Types command - convenience listing over `call`
//!
//! Usage: artifex types [--addr <ADDR>]

use clap::Args;

use crate::commands::call::{send_request, CallArgs};

#[derive(Debug, Args)]
pub struct TypesArgs {
    /// Server address
    #[arg(long, default_value = "127.0.0.1:7430")]
    pub addr: String,
}

/// Execute types command
pub fn execute(args: TypesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let response = send_request(&CallArgs {
        action: "ListTypes".to_string(),
        addr: args.addr,
        object_type: None,
        params: None,
        id: None,
    })?;

    if response["success"] != serde_json::json!(true) {
        return Err(format!(
            "server error: {}",
            response["error"].as_str().unwrap_or("unknown")
        )
        .into());
    }

    let Some(types) = response["data"]["types"].as_array() else {
        return Err("malformed response: missing data.types".into());
    };
    for name in types {
        if let Some(name) = name.as_str() {
            println!("{}", name);
        }
    }
    Ok(())
}
