use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use serde_json::Value;

use daylog::{Context, FileLogger, LogLevel, LoggerConfig};

const USAGE: &str = "\
Usage: daylog [OPTIONS] MESSAGE [KEY=VALUE]...

Append one message to today's log file.

Options:
  --dir DIR          log directory (default: from config, ~/.daylog/logs)
  --level LEVEL      severity of this message (default: info)
  --threshold LEVEL  minimum severity that gets written
  --retain N         number of log files kept by pruning (at least 1)
  --timezone TZ      IANA zone for the timestamp, e.g. Europe/Berlin
  --format FMT       chrono strftime string for the timestamp
  -h, --help         show this help

Each KEY=VALUE pair becomes a context entry; values parse as JSON when
possible and fall back to plain strings.";

struct Args {
    dir: Option<PathBuf>,
    level: LogLevel,
    threshold: Option<LogLevel>,
    retain: Option<usize>,
    timezone: Option<String>,
    format: Option<String>,
    message: String,
    context: Context,
}

fn parse_args(mut argv: impl Iterator<Item = String>) -> Result<Args> {
    let mut dir = None;
    let mut level = LogLevel::Info;
    let mut threshold = None;
    let mut retain = None;
    let mut timezone = None;
    let mut format = None;
    let mut positional: Vec<String> = Vec::new();

    while let Some(arg) = argv.next() {
        let mut value = |name: &str| -> Result<String> {
            argv.next()
                .with_context(|| format!("{} requires a value", name))
        };
        match arg.as_str() {
            "--dir" => dir = Some(PathBuf::from(value("--dir")?)),
            "--level" => level = value("--level")?.parse()?,
            "--threshold" => threshold = Some(value("--threshold")?.parse()?),
            "--retain" => {
                retain = Some(
                    value("--retain")?
                        .parse()
                        .context("--retain requires a positive integer")?,
                )
            }
            "--timezone" => timezone = Some(value("--timezone")?),
            "--format" => format = Some(value("--format")?),
            "-h" | "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            flag if flag.starts_with('-') => bail!("unknown option: {}\n\n{}", flag, USAGE),
            _ => positional.push(arg),
        }
    }

    if positional.is_empty() {
        bail!("missing MESSAGE\n\n{}", USAGE);
    }
    let message = positional.remove(0);

    let mut context = Context::new();
    for pair in positional {
        let (key, raw) = pair
            .split_once('=')
            .with_context(|| format!("context entry '{}' is not KEY=VALUE", pair))?;
        let value = serde_json::from_str::<Value>(raw)
            .unwrap_or_else(|_| Value::String(raw.to_string()));
        context.insert(key.to_string(), value);
    }

    Ok(Args {
        dir,
        level,
        threshold,
        retain,
        timezone,
        format,
        message,
        context,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daylog=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1))?;

    let mut config = LoggerConfig::load()?;
    if let Some(dir) = args.dir {
        config.directory = dir;
    }
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    if let Some(retain) = args.retain {
        config.retained_files = retain;
    }
    if let Some(format) = args.format {
        config.date_format = format;
    }

    let mut logger = FileLogger::from_config(&config)?;
    if let Some(tz) = args.timezone {
        logger.set_timezone_name(&tz)?;
    }

    logger.log(args.level, &args.message, &args.context)?;
    println!("{}", logger.path().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_message_only() {
        let parsed = args(&["hello world"]).unwrap();
        assert_eq!(parsed.message, "hello world");
        assert_eq!(parsed.level, LogLevel::Info);
        assert!(parsed.context.is_empty());
    }

    #[test]
    fn test_parse_flags_and_context() {
        let parsed = args(&[
            "--level",
            "error",
            "--retain",
            "9",
            "boom",
            "user=alice",
            "attempts=3",
        ])
        .unwrap();
        assert_eq!(parsed.level, LogLevel::Error);
        assert_eq!(parsed.retain, Some(9));
        assert_eq!(parsed.context["user"], Value::String("alice".into()));
        assert_eq!(parsed.context["attempts"], Value::from(3));
    }

    #[test]
    fn test_parse_rejects_unknown_flag() {
        assert!(args(&["--frobnicate", "msg"]).is_err());
    }

    #[test]
    fn test_parse_rejects_missing_message() {
        assert!(args(&["--level", "debug"]).is_err());
    }

    #[test]
    fn test_parse_rejects_bad_level() {
        assert!(args(&["--level", "loud", "msg"]).is_err());
    }

    #[test]
    fn test_context_values_parse_as_json() {
        let parsed = args(&["msg", "flag=true", "tags=[1,2]", "name=plain text"]).unwrap();
        assert_eq!(parsed.context["flag"], Value::Bool(true));
        assert_eq!(parsed.context["tags"], serde_json::json!([1, 2]));
        assert_eq!(parsed.context["name"], Value::String("plain text".into()));
    }
}
