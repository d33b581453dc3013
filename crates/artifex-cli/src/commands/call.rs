//! Call command - one-shot client
//!
//! Frames a single request envelope, sends it over TCP, and prints the
//! correlated response.
//!
//! Usage: artifex call <ACTION> [--object-type <TYPE>] [--params <JSON>]

use clap::Args;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;

#[derive(Debug, Args)]
pub struct CallArgs {
    /// Action name, e.g. Ping, CreateObject, InspectObject
    pub action: String,

    /// Server address
    #[arg(long, default_value = "127.0.0.1:7430")]
    pub addr: String,

    /// Target object type
    #[arg(long)]
    pub object_type: Option<String>,

    /// Parameters as a JSON object
    #[arg(long)]
    pub params: Option<String>,

    /// Correlation id; generated when omitted
    #[arg(long)]
    pub id: Option<String>,
}

/// Execute call command
pub fn execute(args: CallArgs) -> Result<(), Box<dyn std::error::Error>> {
    let response = send_request(&args)?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

pub(crate) fn send_request(args: &CallArgs) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let parameters: serde_json::Value = match &args.params {
        Some(text) => serde_json::from_str(text)?,
        None => serde_json::json!({}),
    };
    if !parameters.is_object() {
        return Err("--params must be a JSON object".into());
    }

    let id = args
        .id
        .clone()
        .unwrap_or_else(|| format!("cli-{}", std::process::id()));
    let mut request = serde_json::json!({
        "id": id,
        "action": args.action,
        "parameters": parameters,
    });
    if let Some(object_type) = &args.object_type {
        request["objectType"] = serde_json::json!(object_type);
    }

    let mut stream = TcpStream::connect(&args.addr)?;
    let mut line = request.to_string();
    line.push('\n');
    stream.write_all(line.as_bytes())?;

    let mut reader = BufReader::new(stream);
    let mut response_line = String::new();
    reader.read_line(&mut response_line)?;
    if response_line.is_empty() {
        return Err("server closed the connection without responding".into());
    }
    Ok(serde_json::from_str(&response_line)?)
}
