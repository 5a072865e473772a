use crate::cli::WhereArgs;
use crate::config::ConfigFile;
use predsql::{FormatConfig, Where, compile_with};
use std::io::Read;
use std::path::Path;

pub fn run(args: WhereArgs) -> anyhow::Result<()> {
    let file = ConfigFile::load(&args.config, args.config_explicit)?;
    let mut format = file.format;
    if let Some(placeholder) = args.placeholder {
        format.placeholder = placeholder;
    }

    let raw = read_input(args.input.as_deref())?;
    let out = render(&raw, &format, args.json)?;
    println!("{out}");
    Ok(())
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| anyhow::anyhow!("failed to read stdin: {e}"))?;
            Ok(buf)
        }
    }
}

/// Compile `raw` JSON and format the output.
///
/// Plain mode prints the SQL, then the parameter array on its own line.
fn render(raw: &str, format: &FormatConfig, json: bool) -> anyhow::Result<String> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| anyhow::anyhow!("invalid JSON input: {e}"))?;
    let tree = Where::from_json(&value)?;
    let fragment = compile_with(&tree, format, 0)?;

    if json {
        let obj = serde_json::json!({
            "sql": fragment.sql,
            "params": fragment.params,
        });
        return Ok(serde_json::to_string_pretty(&obj)?);
    }

    let params = serde_json::to_string(&fragment.params)?;
    Ok(format!("{}\n{params}", fragment.sql))
}
