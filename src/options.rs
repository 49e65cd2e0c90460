use std::{env, path::Path};

use log::LevelFilter;

use crate::{Error, Policy, Result};

/// Runtime options for a construction run.
#[derive(Clone, Debug)]
pub struct Options {
    /// Insertion heuristic.
    pub policy: Policy,
    /// Worker threads per selection round. 0 means one per CPU.
    pub threads: usize,
    /// Logging level.
    pub log_level: LogLevel,
    /// Logging output format.
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    pub log_timestamp: bool,
    /// Optional log file. Empty means stderr.
    pub log_output: String,
    /// Optional coordinate file. Empty means stdin.
    pub input: String,
    /// Optional tour file. Empty means stdout.
    pub output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            "off" => Ok(Self::Off),
            other => Err(Error::invalid_input(format!(
                "Invalid value for --log-level: {other}"
            ))),
        }
    }

    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            other => Err(Error::invalid_input(format!(
                "Invalid value for --log-format: {other}"
            ))),
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            policy: Policy::Cheapest,
            threads: 0,
            log_level: LogLevel::Info,
            log_format: LogFormat::Compact,
            log_timestamp: false,
            log_output: String::new(),
            input: String::new(),
            output: String::new(),
        }
    }
}

impl Options {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    /// Accepts `--name value`, `--name=value`, and up to two positional
    /// arguments taken as `<input> <output>`.
    pub fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut positional = 0;
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            if !arg.starts_with("--") {
                match positional {
                    0 => options.input = arg,
                    1 => options.output = arg,
                    _ => {
                        return Err(Error::invalid_input(format!(
                            "Unexpected argument: {arg}\n\n{}",
                            Self::usage()
                        )))
                    }
                }
                positional += 1;
                continue;
            }

            let raw_name = &arg[2..];

            let (name, value) = match raw_name.split_once('=') {
                Some((k, v)) => (k.to_string(), Some(v.to_string())),
                None => {
                    let value = match args.peek() {
                        Some(next) if !next.starts_with("--") && name_takes_value(raw_name) => {
                            args.next()
                        }
                        _ => None,
                    };
                    (raw_name.to_string(), value)
                }
            };

            match name.as_str() {
                "log-timestamp" => {
                    options.log_timestamp = match value {
                        Some(v) => parse_bool(&name, &v)?,
                        None => true,
                    };
                }
                "policy" => options.policy = Policy::parse(&required(&name, value)?)?,
                "threads" => {
                    let raw = required(&name, value)?;
                    options.threads = raw.trim().parse().map_err(|_| {
                        Error::invalid_input(format!("Invalid value for --threads: {raw}"))
                    })?;
                }
                "log-level" => options.log_level = LogLevel::parse(&required(&name, value)?)?,
                "log-format" => {
                    options.log_format = LogFormat::parse(&required(&name, value)?)?
                }
                "log-output" => options.log_output = required(&name, value)?,
                "input" => options.input = required(&name, value)?,
                "output" => options.output = required(&name, value)?,
                _ => {
                    return Err(Error::invalid_input(format!(
                        "Unknown option: --{name}\n\n{}",
                        Self::usage()
                    )));
                }
            }
        }

        Ok(options)
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage:\n",
            "  tsp-insertion [options] <input> <output>\n",
            "  tsp-insertion [options] < points.txt\n\n",
            "Options:\n",
            "  --policy <cheapest|farthest>\n",
            "  --threads <usize>\n",
            "  --log-level <error|warn|info|debug|trace|off>\n",
            "  --log-format <compact|pretty>\n",
            "  --log-timestamp[=<bool>]\n",
            "  --log-output <path>\n",
            "  --input <path>\n",
            "  --output <path>\n",
            "  --help\n",
            "\n",
            "Input is one x,y pair per line. Output is the point count plus one,\n",
            "then the tour with the start vertex repeated at the end.\n",
        )
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        non_empty_path(&self.log_output)
    }

    pub fn input_path(&self) -> Option<&Path> {
        non_empty_path(&self.input)
    }

    pub fn output_path(&self) -> Option<&Path> {
        non_empty_path(&self.output)
    }
}

fn name_takes_value(name: &str) -> bool {
    name != "log-timestamp"
}

fn required(name: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| Error::invalid_input(format!("Missing value for --{name}")))
}

fn non_empty_path(raw: &str) -> Option<&Path> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        None
    } else {
        Some(Path::new(raw))
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::invalid_input(format!(
            "Invalid boolean for --{name}: {value}"
        ))),
    }
}
