use clap::Parser;
use std::path::PathBuf;

/// Command line interface for the application
#[derive(Parser, Debug)]
#[command(name = "step-guide", version, about = "Step-by-step guidance for routine tasks")]
pub struct Cli {
    /// What you need help with; prompted for when omitted
    pub request: Option<String>,

    /// Task override file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(short, long)]
    pub tasks_file: Option<PathBuf>,

    /// Only use the local task library, never the LLM planner
    #[arg(long)]
    pub no_llm: bool,

    /// Print the known tasks and exit
    #[arg(long)]
    pub list: bool,

    /// Sets the logging verbosity level for the application
    /// Possible values: "error", "warn", "info", "debug", "trace"
    #[arg(long, default_value_t = String::from("warn"))]
    pub logging_level: String,

    /// Also write logs to a daily rotating file under ./logs
    #[arg(long)]
    pub log_to_file: bool,
}
