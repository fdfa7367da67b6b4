//! `os`: host information selected by a `--flag`.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;

use super::{Command, CommandArgs, CommandContext};
use crate::error::CommandError;

/// Produces the printable value for one flag.
type InfoProducer = fn() -> Result<String, CommandError>;

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

const CPUINFO_PATH: &str = "/proc/cpuinfo";

/// Flag-to-producer sub-table. Built once in [`OsCommand::new`].
pub struct OsCommand {
    producers: HashMap<&'static str, InfoProducer>,
}

impl OsCommand {
    pub fn new() -> Self {
        let mut producers: HashMap<&'static str, InfoProducer> = HashMap::new();
        producers.insert("eol", eol);
        producers.insert("cpus", cpus);
        producers.insert("homedir", homedir);
        producers.insert("username", username);
        producers.insert("hostname", host_name);
        producers.insert("architecture", architecture);
        Self { producers }
    }

    /// Supported flag names, sorted.
    pub fn flags(&self) -> Vec<&'static str> {
        let mut flags: Vec<_> = self.producers.keys().copied().collect();
        flags.sort_unstable();
        flags
    }

    /// Value for `flag` (with or without its leading `--`).
    pub fn lookup(&self, flag: &str) -> Result<String, CommandError> {
        let key = flag.strip_prefix("--").unwrap_or(flag);
        let producer = self.producers.get(key).ok_or(CommandError::InvalidInput)?;
        producer()
    }
}

impl Default for OsCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Command for OsCommand {
    fn name(&self) -> &'static str {
        "os"
    }

    async fn exec(
        &self,
        ctx: &mut CommandContext<'_>,
        args: &CommandArgs,
    ) -> Result<(), CommandError> {
        let value = self.lookup(args.first_raw()?)?;
        ctx.write_line(&value).await?;
        Ok(())
    }
}

fn eol() -> Result<String, CommandError> {
    serde_json::to_string(LINE_ENDING).map_err(|e| CommandError::Failed(e.to_string()))
}

/// One logical CPU as reported by the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CpuInfo {
    pub model: String,
    /// Clock speed in GHz, when the host reports one.
    pub speed_ghz: Option<f64>,
}

#[derive(Debug, Serialize)]
struct CpuReport {
    count: usize,
    cpus: Vec<CpuInfo>,
}

fn cpus() -> Result<String, CommandError> {
    // Hosts without /proc/cpuinfo still report the count.
    let cpus = std::fs::read_to_string(CPUINFO_PATH)
        .map(|text| parse_cpuinfo(&text))
        .unwrap_or_default();
    let report = CpuReport {
        count: num_cpus::get(),
        cpus,
    };
    serde_json::to_string_pretty(&report).map_err(|e| CommandError::Failed(e.to_string()))
}

/// Extract per-processor model names and clock speeds from a
/// `/proc/cpuinfo`-formatted document.
pub fn parse_cpuinfo(text: &str) -> Vec<CpuInfo> {
    let mut cpus = Vec::new();
    let mut current: Option<CpuInfo> = None;
    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        match key {
            "processor" => {
                if let Some(done) = current.take() {
                    cpus.push(done);
                }
                current = Some(CpuInfo {
                    model: String::new(),
                    speed_ghz: None,
                });
            }
            "model name" => {
                if let Some(cpu) = current.as_mut() {
                    cpu.model = value.to_string();
                }
            }
            "cpu MHz" => {
                if let Some(cpu) = current.as_mut() {
                    cpu.speed_ghz = value
                        .parse::<f64>()
                        .ok()
                        .map(|mhz| (mhz / 10.0).round() / 100.0);
                }
            }
            _ => {}
        }
    }
    cpus.extend(current);
    cpus
}

fn homedir() -> Result<String, CommandError> {
    dirs::home_dir()
        .map(|path| path.display().to_string())
        .ok_or_else(|| CommandError::Failed("home directory unavailable".into()))
}

fn username() -> Result<String, CommandError> {
    ["USER", "USERNAME"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.trim().is_empty())
        .map(Ok)
        .unwrap_or_else(host_name)
}

fn host_name() -> Result<String, CommandError> {
    Ok(hostname::get()?.to_string_lossy().into_owned())
}

fn architecture() -> Result<String, CommandError> {
    Ok(std::env::consts::ARCH.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionCursor;
    use crate::shutdown::ShutdownSignal;

    async fn run(raw: &[&str]) -> (Result<(), CommandError>, String) {
        let mut cursor = SessionCursor::new("ann", "/home/ann");
        let raw: Vec<String> = raw.iter().map(|s| s.to_string()).collect();
        let args = CommandArgs::resolve(&cursor, &raw);
        let mut out: Vec<u8> = Vec::new();
        let shutdown = ShutdownSignal::new();
        let mut ctx = CommandContext {
            cursor: &mut cursor,
            out: &mut out,
            shutdown: &shutdown,
        };
        let result = OsCommand::new().exec(&mut ctx, &args).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn flag_table_is_fixed() {
        assert_eq!(
            OsCommand::new().flags(),
            vec!["architecture", "cpus", "eol", "homedir", "hostname", "username"]
        );
    }

    #[test]
    fn leading_dashes_are_optional() {
        let os = OsCommand::new();
        assert_eq!(
            os.lookup("--architecture").unwrap(),
            os.lookup("architecture").unwrap()
        );
    }

    #[test]
    fn eol_is_json_quoted() {
        let value = OsCommand::new().lookup("--eol").unwrap();
        assert!(value.starts_with('"') && value.ends_with('"'), "got: {value}");
        assert!(value.contains("\\n"));
    }

    #[test]
    fn cpus_report_is_pretty_json_with_count() {
        let value = OsCommand::new().lookup("--cpus").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&value).unwrap();
        assert!(parsed["count"].as_u64().unwrap() >= 1);
        assert!(parsed["cpus"].is_array());
        assert!(value.contains('\n'));
    }

    #[test]
    fn parse_cpuinfo_reads_each_processor() {
        let text = "processor\t: 0\nvendor_id\t: GenuineIntel\nmodel name\t: Example CPU @ 2.40GHz\ncpu MHz\t\t: 2400.000\n\nprocessor\t: 1\nmodel name\t: Example CPU @ 2.40GHz\n";
        let cpus = parse_cpuinfo(text);
        assert_eq!(cpus.len(), 2);
        assert_eq!(cpus[0].model, "Example CPU @ 2.40GHz");
        assert_eq!(cpus[0].speed_ghz, Some(2.4));
        assert_eq!(cpus[1].speed_ghz, None);
    }

    #[test]
    fn parse_cpuinfo_without_processors_is_empty() {
        assert!(parse_cpuinfo("Hardware : something\n").is_empty());
        assert!(parse_cpuinfo("").is_empty());
    }

    #[tokio::test]
    async fn architecture_prints_target_arch() {
        let (result, out) = run(&["--architecture"]).await;
        result.unwrap();
        assert_eq!(out, format!("{}\n", std::env::consts::ARCH));
    }

    #[tokio::test]
    async fn username_is_never_empty() {
        let (result, out) = run(&["--username"]).await;
        result.unwrap();
        assert!(!out.trim().is_empty());
    }

    #[tokio::test]
    async fn unknown_flag_is_invalid_input() {
        let (result, out) = run(&["--kernel"]).await;
        assert!(matches!(result, Err(CommandError::InvalidInput)));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn missing_flag_is_invalid_input() {
        let (result, _) = run(&[]).await;
        assert!(matches!(result, Err(CommandError::InvalidInput)));
    }
}
