//! Entrypoint for CLI
use std::{error::Error, io::Write, path::PathBuf};

use clap::{Parser, Subcommand};
use compflow::{constants::CAPTION, svg, Stage, STAGES};
use compflow_win::ViewerConf;
use log::{error, info};

/// Draw the compilation process flowchart.
#[derive(Debug, Parser)]
#[command(name = "compflow", version, about)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Cmd>,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Open the flowchart in a window (default)
    View {
        /// Viewer config file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Write the flowchart as an SVG image
    Export {
        /// Output file
        #[arg(short, long, default_value = "compflow.svg")]
        output: PathBuf,
    },
    /// Print the pipeline stages
    Stages,
}

fn run_viewer(config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let conf = match config {
        Some(filepath) => {
            info!("load config: {}", filepath.display());
            ViewerConf::from_file(filepath)?
        }
        None => ViewerConf::default(),
    };
    compflow_win::run_viewer(conf)?;
    Ok(())
}

fn run_export(output: PathBuf) -> Result<(), Box<dyn Error>> {
    let figure = compflow::pipeline_figure();
    svg::write_to_path(&figure, &output)?;
    Ok(())
}

fn print_stages(stages: &[Stage], out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "   y | stage                          | input -> output")?;
    for stage in stages {
        let name = stage.name.replace('\n', " ");
        writeln!(
            out,
            "{y:4.1} | {name: <30} | {input} -> {output}",
            y = stage.y,
            input = stage.input,
            output = stage.output,
        )?;
        writeln!(out, "     | {}", stage.description)?;
    }
    writeln!(out)?;
    writeln!(out, "{CAPTION}")?;
    Ok(())
}

fn main() {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .env()
        .init()
        .expect("logger is initialised once");

    let cli = Cli::parse();

    let result = match cli.cmd.unwrap_or(Cmd::View { config: None }) {
        Cmd::View { config } => run_viewer(config),
        Cmd::Export { output } => run_export(output),
        Cmd::Stages => print_stages(&STAGES, &mut std::io::stdout().lock()).map_err(Into::into),
    };

    if let Err(err) = result {
        error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod test {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_export() {
        let cli = Cli::try_parse_from(["compflow", "export", "-o", "out.svg"]).unwrap();
        match cli.cmd {
            Some(Cmd::Export { output }) => assert_eq!(output, PathBuf::from("out.svg")),
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::try_parse_from(["compflow", "export"]).unwrap();
        assert!(matches!(cli.cmd, Some(Cmd::Export { output }) if output == PathBuf::from("compflow.svg")));
    }

    #[test]
    fn test_default_is_view() {
        let cli = Cli::try_parse_from(["compflow"]).unwrap();
        assert!(cli.cmd.is_none());
    }

    #[test]
    fn test_print_stages() {
        let mut out = Vec::new();
        print_stages(&STAGES, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("词法分析 (Lexical Analysis)"));
        assert!(text.contains("源代码(.i) -> Token序列"));
        assert!(text.trim_end().ends_with(CAPTION));
        // Header plus one row per stage.
        assert_eq!(text.matches(" -> ").count(), STAGES.len() + 1);
    }
}
