use clap::Parser;

/// Arguments for the run command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Start the packaged entry point:\n    rtdep run\n\n\
                  Pass arguments to the application:\n    rtdep run -- --config app.toml\n\n\
                  Resolve dependencies remotely:\n    rtdep --mode remote run")]
pub struct RunArgs {
    /// Arguments handed to the entry point unchanged
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,
}
