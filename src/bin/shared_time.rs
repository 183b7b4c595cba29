use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use num_format::{Locale, ToFormattedString};
use shared_time::dates::{parse_ymd, years_between};
use shared_time::models::FigureSource;
use shared_time::storage::JsonFileStore;
use shared_time::strategy::{MILESTONE_PRESETS, find_preset};
use shared_time::{
    Client, Clock, Config, FeatureState, FixedClock, Gender, LifeExpectancyFigure, Person,
    SharedTimeCalculator, SystemClock, VisualizationMode, VisualizationResult, countries, feature,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "shared-time",
    version,
    about = "Reflect on the time left together with the people in your family"
)]
struct Cli {
    /// Config file (default: ~/.config/shared-time/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Members file (overrides store_path from the config)
    #[arg(long, global = true)]
    store: Option<PathBuf>,
    /// Don't contact the World Bank; use the fallback table only.
    #[arg(long, global = true, default_value_t = false)]
    offline: bool,
    /// Pretend today is this date (YYYY-MM-DD).
    #[arg(long, global = true, value_parser = parse_ymd)]
    today: Option<NaiveDate>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a projection from flags, without touching the store.
    Project(ProjectArgs),
    /// Manage family members.
    #[command(subcommand)]
    Member(MemberCommand),
    /// Set up (or change) a member's time-together view. Enables it.
    Configure {
        id: String,
        #[command(flatten)]
        mode: ModeArgs,
    },
    /// Show a member's view again with its saved settings.
    Enable { id: String },
    /// Hide a member's view; settings are kept.
    Disable { id: String },
    /// Print a member's projection.
    Show {
        id: String,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List milestone presets resolved for a member.
    Presets { id: String },
    /// List countries available for life-expectancy lookups.
    Countries,
}

#[derive(Subcommand, Debug)]
enum MemberCommand {
    /// Add a family member.
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long, value_parser = parse_ymd)]
        born: NaiveDate,
        /// Start of the relationship (YYYY-MM-DD)
        #[arg(long, value_parser = parse_ymd)]
        together_since: NaiveDate,
    },
    /// List family members and the state of their view.
    List,
}

#[derive(Args, Debug)]
struct ProjectArgs {
    /// Date of birth (YYYY-MM-DD)
    #[arg(long, value_parser = parse_ymd)]
    born: NaiveDate,
    /// Start of the relationship (YYYY-MM-DD)
    #[arg(long, value_parser = parse_ymd)]
    together_since: NaiveDate,
    #[command(flatten)]
    mode: ModeArgs,
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeKind {
    LifeExpectancy,
    Milestone,
    Custom,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum GenderArg {
    Male,
    Female,
}

impl From<GenderArg> for Gender {
    fn from(g: GenderArg) -> Self {
        match g {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
        }
    }
}

#[derive(Args, Debug)]
struct ModeArgs {
    /// How to pick the end date.
    #[arg(long, value_enum, default_value = "milestone")]
    mode: ModeKind,
    /// Country for life-expectancy mode.
    #[arg(long, default_value = countries::DEFAULT_COUNTRY)]
    country: String,
    /// Lookup axis for life-expectancy mode.
    #[arg(long, value_enum, default_value = "male")]
    gender: GenderArg,
    /// Milestone label.
    #[arg(long)]
    label: Option<String>,
    /// Milestone date (YYYY-MM-DD).
    #[arg(long, value_parser = parse_ymd)]
    target: Option<NaiveDate>,
    /// Milestone preset label, e.g. "Until they turn 18".
    #[arg(long, conflicts_with_all = ["label", "target"])]
    preset: Option<String>,
    /// Custom mode start date (YYYY-MM-DD, default today).
    #[arg(long, value_parser = parse_ymd)]
    start: Option<NaiveDate>,
    /// Custom mode length in years.
    #[arg(long)]
    years: Option<u32>,
}

impl ModeArgs {
    fn to_mode(&self, person: &Person, today: NaiveDate) -> Result<VisualizationMode> {
        Ok(match self.mode {
            ModeKind::LifeExpectancy => VisualizationMode::LifeExpectancy {
                country: self.country.clone(),
                gender: self.gender.into(),
            },
            ModeKind::Milestone => match &self.preset {
                Some(name) => find_preset(name)
                    .with_context(|| format!("unknown preset {name:?}"))?
                    .mode_for(person),
                None => VisualizationMode::Milestone {
                    label: self.label.clone().unwrap_or_default(),
                    target_date: self.target,
                },
            },
            ModeKind::Custom => VisualizationMode::Custom {
                start_date: Some(self.start.unwrap_or(today)),
                years: self.years,
            },
        })
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if cli.offline {
        config.provider.enabled = false;
    }
    let store = JsonFileStore::new(cli.store.clone().unwrap_or_else(|| config.store_path()));

    let table = config.fallback_table();
    match cli.today {
        Some(date) => run(
            cli.cmd,
            &config,
            store,
            SharedTimeCalculator::new(FixedClock(date), table),
        ),
        None => run(
            cli.cmd,
            &config,
            store,
            SharedTimeCalculator::new(SystemClock, table),
        ),
    }
}

fn run<C: Clock>(
    cmd: Command,
    config: &Config,
    mut store: JsonFileStore,
    calc: SharedTimeCalculator<C>,
) -> Result<()> {
    let today = calc.today();
    match cmd {
        Command::Project(args) => {
            let person = Person {
                id: "cli".into(),
                name: "them".into(),
                birth_date: args.born,
                together_since: args.together_since,
            };
            let mode = args.mode.to_mode(&person, today)?;
            let figure = calc.figure_for(&mode, &Client::from_config(&config.provider)?);
            let result = calc.compute(&person, &mode, figure.as_ref());
            print_result(&result, figure.as_ref(), args.json)
        }
        Command::Member(MemberCommand::Add {
            id,
            name,
            born,
            together_since,
        }) => {
            store.add_member(Person {
                id: id.clone(),
                name,
                birth_date: born,
                together_since,
            })?;
            eprintln!("Added {} to {}", id, store.path().display());
            Ok(())
        }
        Command::Member(MemberCommand::List) => {
            for r in store.members()? {
                println!(
                    "{:<12} {:<20} age {:>3}  time together: {}",
                    r.member.id,
                    r.member.name,
                    years_between(r.member.birth_date, today),
                    FeatureState::of(r.time_visualization.as_ref())
                );
            }
            Ok(())
        }
        Command::Configure { id, mode } => {
            let person = store.member(&id)?.member;
            let mode = mode.to_mode(&person, today)?;
            store.update(&id, |slot| feature::configure(slot, mode))?;
            eprintln!("Time together enabled for {}", person.name);
            Ok(())
        }
        Command::Enable { id } => {
            store.update(&id, feature::enable)??;
            eprintln!("Time together enabled for {id}");
            Ok(())
        }
        Command::Disable { id } => {
            store.update(&id, feature::disable)??;
            eprintln!("Time together hidden for {id}; settings kept");
            Ok(())
        }
        Command::Show { id, json } => {
            let record = store.member(&id)?;
            let settings = record.time_visualization.as_ref();
            match FeatureState::of(settings) {
                FeatureState::Unset => {
                    println!(
                        "Time together isn't set up for {}. Try `shared-time configure {}`.",
                        record.member.name, id
                    );
                    Ok(())
                }
                FeatureState::Disabled => {
                    println!("Time together is hidden for {}.", record.member.name);
                    Ok(())
                }
                FeatureState::Enabled => {
                    let figure = match settings {
                        Some(s) => {
                            calc.figure_for(&s.mode, &Client::from_config(&config.provider)?)
                        }
                        None => None,
                    };
                    match calc.visualize(&record.member, settings, figure.as_ref()) {
                        Some(result) => print_result(&result, figure.as_ref(), json),
                        None => Ok(()),
                    }
                }
            }
        }
        Command::Presets { id } => {
            let person = store.member(&id)?.member;
            for p in MILESTONE_PRESETS {
                println!("{:<24} {}", p.label, p.target_date(person.birth_date));
            }
            Ok(())
        }
        Command::Countries => {
            let table = calc.table();
            for (name, iso3) in countries::COUNTRIES {
                let row = table.get(name).unwrap_or(table.default_row());
                println!(
                    "{:<22} {}  fallback ♂ {:.0} / ♀ {:.0}",
                    name, iso3, row.male, row.female
                );
            }
            Ok(())
        }
    }
}

fn print_result(
    result: &VisualizationResult,
    figure: Option<&LifeExpectancyFigure>,
    json: bool,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }
    println!("{}", result.label);
    if let Some(f) = figure.filter(|f| f.source == FigureSource::WorldBank) {
        println!("  Data: {}", f.source);
    }
    println!("  ends        {}", result.end_date);
    if result.is_past {
        println!("  that date has passed");
    } else {
        println!(
            "  remaining   ~{} years ({} days)",
            result.years_remaining,
            result.days_remaining.to_formatted_string(&Locale::en)
        );
    }
    println!("  progress    {:.1}%", result.progress_percent);
    Ok(())
}
