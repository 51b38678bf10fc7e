use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use hydraulics_toolbox::app::{self, AppError, AppResult, Session};
use hydraulics_toolbox::config::{self, CONFIG_FILE};
use hydraulics_toolbox::conversion;
use hydraulics_toolbox::format::{format_result, parse_decimal};
use hydraulics_toolbox::history::RecordStore;
use hydraulics_toolbox::i18n::{self, keys, Translator};
use hydraulics_toolbox::quantity::QuantityKind;
use hydraulics_toolbox::solver::continuity::{self, CrossSection, Fill};
use hydraulics_toolbox::solver::EquationMode;

#[derive(Parser)]
#[command(name = "hydraulics_toolbox")]
#[command(about = "Hydraulics calculators that solve for the single unknown field", long_about = None)]
struct Cli {
    /// Interface language (ko, en, de or auto)
    #[arg(long, default_value = "auto", global = true)]
    lang: String,
    /// Path to the TOML configuration file
    #[arg(long, default_value = CONFIG_FILE, global = true)]
    config: PathBuf,
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu (default)
    Interactive,
    /// Solve one calculator from command-line field values
    Solve {
        /// Calculator: froude, continuity, bernoulli, bernoulli-losses,
        /// bernoulli-cavitation, reynolds, colebrook
        mode: EquationMode,
        /// Field value as ID=VALUE[:UNIT]; omit the unknown field
        #[arg(short = 'f', long = "field", value_name = "ID=VALUE[:UNIT]")]
        fields: Vec<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Do not append the result to history
        #[arg(long)]
        no_history: bool,
    },
    /// List the fields of a calculator with their default units
    Fields {
        mode: EquationMode,
    },
    /// Convert a value between units of one quantity
    Convert {
        /// Quantity key (length, pressure, temperature, ...)
        kind: String,
        value: String,
        from: String,
        to: String,
    },
    /// List available units
    Units {
        /// Quantity key; lists every quantity when omitted
        kind: Option<String>,
    },
    /// Flow area of a partially or fully filled cross-section [m, m²]
    Area {
        #[arg(value_enum)]
        shape: Shape,
        /// Diameter, side or width
        size: f64,
        /// Section height (rectangular only)
        #[arg(long)]
        height: Option<f64>,
        /// Fill height; full section when omitted
        #[arg(long)]
        fill: Option<f64>,
    },
    /// Manage stored calculations
    #[command(subcommand)]
    History(HistoryCommands),
}

#[derive(Clone, Copy, ValueEnum)]
enum Shape {
    Circular,
    Square,
    Rectangular,
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// List records, newest first
    List {
        /// Only records whose calculation type starts with this prefix
        #[arg(long)]
        prefix: Option<String>,
        /// Use favorites instead of history
        #[arg(long)]
        favorites: bool,
    },
    /// Delete one record by id
    Delete {
        id: u64,
        #[arg(long)]
        favorites: bool,
    },
    /// Delete all records, or only those matching a type prefix
    Clear {
        #[arg(long)]
        prefix: Option<String>,
        #[arg(long)]
        favorites: bool,
    },
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let lang = cli.lang.clone();

    match try_run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let tr = Translator::new(&i18n::resolve_language(&lang, None));
            eprintln!("{}: {err}", tr.t(keys::ERROR_PREFIX));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn try_run(cli: Cli) -> AppResult<()> {
    let cfg = config::load_or_default(&cli.config)?;
    let mut session = Session::new(cfg, cli.config.clone(), &cli.lang);

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => app::run(&mut session),
        Commands::Solve {
            mode,
            fields,
            json,
            no_history,
        } => cmd_solve(&session, mode, &fields, json, !no_history),
        Commands::Fields { mode } => cmd_fields(&session, mode),
        Commands::Convert {
            kind,
            value,
            from,
            to,
        } => cmd_convert(&session, &kind, &value, &from, &to),
        Commands::Units { kind } => cmd_units(kind.as_deref()),
        Commands::Area {
            shape,
            size,
            height,
            fill,
        } => cmd_area(&session, shape, size, height, fill),
        Commands::History(cmd) => cmd_history(&session, cmd),
    }
}

fn cmd_solve(
    session: &Session,
    mode: EquationMode,
    assignments: &[String],
    json: bool,
    save: bool,
) -> AppResult<()> {
    let mut fields = session.blank_fields(mode);
    for arg in assignments {
        let (id, value, unit) = app::parse_field_assignment(arg)?;
        app::apply_assignment(mode, &mut fields, &id, &value, unit.as_deref())?;
    }

    let result = app::calculate(mode, &fields)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", session.tr.mode_name(mode));
        for line in session.render(&result, &fields) {
            println!("  {line}");
        }
    }

    if save && result.is_valid() {
        let notice = session.record(&session.history, &fields, &result, keys::CALC_SAVED);
        eprintln!("{notice}");
    }
    Ok(())
}

fn cmd_fields(session: &Session, mode: EquationMode) -> AppResult<()> {
    println!("{} ({})", session.tr.mode_name(mode), mode.key());
    for field in session.blank_fields(mode) {
        let default = if field.raw_value.is_empty() {
            String::new()
        } else {
            format!(" = {}", field.raw_value)
        };
        println!(
            "  {:<8} {:<28} [{}]{default}",
            field.id,
            session.tr.field_label(mode, &field.id),
            field.unit
        );
    }
    Ok(())
}

fn parse_kind(key: &str) -> AppResult<QuantityKind> {
    QuantityKind::from_key(key)
        .ok_or_else(|| AppError::InvalidArgument(format!("unknown quantity '{key}'")))
}

fn cmd_convert(session: &Session, kind: &str, value: &str, from: &str, to: &str) -> AppResult<()> {
    let kind = parse_kind(kind)?;
    let value = parse_decimal(value)
        .ok_or_else(|| AppError::InvalidArgument(format!("'{value}' is not a number")))?;
    let result = conversion::convert(value, kind, from, to)?;
    println!("{} {to}", session.separator().localize(&format_result(result)));
    Ok(())
}

fn cmd_units(kind: Option<&str>) -> AppResult<()> {
    let kinds = match kind {
        Some(key) => vec![parse_kind(key)?],
        None => QuantityKind::ALL
            .iter()
            .copied()
            .filter(|k| *k != QuantityKind::Dimensionless)
            .collect(),
    };
    for kind in kinds {
        println!("{:<20} {}", kind.key(), conversion::units_of(kind).join(", "));
    }
    Ok(())
}

fn cmd_area(
    session: &Session,
    shape: Shape,
    size: f64,
    height: Option<f64>,
    fill: Option<f64>,
) -> AppResult<()> {
    let section = match shape {
        Shape::Circular => CrossSection::Circular { diameter: size },
        Shape::Square => CrossSection::Square { side: size },
        Shape::Rectangular => CrossSection::Rectangular {
            width: size,
            height: height.ok_or_else(|| {
                AppError::InvalidArgument("rectangular section needs --height".to_string())
            })?,
        },
    };
    let fill = fill.map_or(Fill::Total, |height| Fill::Partial { height });
    let area = continuity::flow_area(section, fill)?;
    println!("{}", session.separator().localize(&format_result(area)));
    Ok(())
}

fn pick_store(session: &Session, favorites: bool) -> &RecordStore {
    if favorites {
        &session.favorites
    } else {
        &session.history
    }
}

fn cmd_history(session: &Session, cmd: HistoryCommands) -> AppResult<()> {
    let store = |favorites| pick_store(session, favorites);
    match cmd {
        HistoryCommands::List { prefix, favorites } => {
            let store = store(favorites);
            let records = match prefix {
                Some(p) => store.list_by_type_prefix(&p)?,
                None => store.list()?,
            };
            if records.is_empty() {
                println!("{}", session.tr.t(keys::HISTORY_EMPTY));
            }
            for record in records {
                println!("{}", serde_json::to_string(&record)?);
            }
        }
        HistoryCommands::Delete { id, favorites } => {
            let key = if store(favorites).delete(id)? {
                keys::HISTORY_DELETED
            } else {
                keys::HISTORY_NOT_FOUND
            };
            println!("{}", session.tr.t(key));
        }
        HistoryCommands::Clear { prefix, favorites } => {
            let store = store(favorites);
            match prefix {
                Some(p) => {
                    store.delete_by_type_prefix(&p)?;
                }
                None => store.clear()?,
            }
            println!("{}", session.tr.t(keys::HISTORY_CLEARED));
        }
    }
    Ok(())
}
