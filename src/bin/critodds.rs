//! Terminal front end for the crit odds calculator.
//!
//! One-shot mode takes every form field as a flag and prints the summary
//! and distribution table (or JSON). Interactive mode prompts for the
//! fields like a form and recalculates until `q` or end of input.

use anyhow::{Context, Result};
use clap::Parser;
use critodds::report::render_breakdown;
use critodds::{
    run_calculation, Calculation, Calculator, Field, ModifierForm, TableView, DEFAULT_MAX_TRIALS,
};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Crit chance and binomial odds calculator")]
struct Args {
    /// Number of trials (n)
    #[arg(short = 'n', long, default_value = critodds::modifiers::DEFAULT_TRIALS, allow_hyphen_values = true)]
    trials: String,

    /// Base crit value (BC)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    crit_base: String,

    /// Base crit-resist value (BCR)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    crit_res_base: String,

    /// Crit from equipment (X)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    equipment: String,

    /// Crit from skill (Y)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    skill: String,

    /// Crit buff percent (CP)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    buff: String,

    /// Crit debuff percent (DCRP)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    debuff: String,

    /// Print the calculation as JSON
    #[arg(long)]
    json: bool,

    /// Also print the C / CR / FC breakdown
    #[arg(long)]
    breakdown: bool,

    /// Prompt for fields and recalculate until `q`
    #[arg(short, long)]
    interactive: bool,

    /// Largest accepted trial count
    #[arg(long, default_value_t = DEFAULT_MAX_TRIALS)]
    max_trials: u64,

    /// Accept any trial count
    #[arg(long, conflicts_with = "max_trials")]
    no_limit: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn form(&self) -> ModifierForm {
        ModifierForm::blank()
            .with(Field::Trials, self.trials.as_str())
            .with(Field::CritBase, self.crit_base.as_str())
            .with(Field::CritResBase, self.crit_res_base.as_str())
            .with(Field::Equipment, self.equipment.as_str())
            .with(Field::Skill, self.skill.as_str())
            .with(Field::BuffPercent, self.buff.as_str())
            .with(Field::DebuffPercent, self.debuff.as_str())
    }

    fn calculator(&self) -> Calculator {
        let max_trials = (!self.no_limit).then_some(self.max_trials);
        Calculator::new().with_max_trials(max_trials)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_calculation(
    out: &mut impl Write,
    calculation: &Calculation,
    view: &TableView,
    args: &Args,
) -> Result<()> {
    if args.json {
        let json = serde_json::to_string_pretty(calculation).context("failed to encode JSON")?;
        writeln!(out, "{}", json)?;
        return Ok(());
    }
    if args.breakdown {
        write!(out, "{}", render_breakdown(&calculation.crit))?;
        writeln!(out)?;
    }
    write!(out, "{}", view.render())?;
    Ok(())
}

fn run_once(args: &Args) -> Result<ExitCode> {
    let mut view = TableView::new();
    match run_calculation(&args.calculator(), &args.form(), &mut view) {
        Ok(calculation) => {
            let stdout = io::stdout();
            print_calculation(&mut stdout.lock(), &calculation, &view, args)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            eprintln!("Input Error: {}", error);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Prompt for one field. Returns `None` on `q` or end of input.
fn prompt_field(
    input: &mut impl BufRead,
    out: &mut impl Write,
    field: Field,
    current: &str,
) -> Result<Option<String>> {
    write!(out, "{} [{}]: ", field.label(), current)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let entered = line.trim();
    if entered.eq_ignore_ascii_case("q") {
        return Ok(None);
    }
    // Enter keeps the current value; "-" clears the field.
    Ok(Some(match entered {
        "" => current.to_string(),
        "-" => String::new(),
        other => other.to_string(),
    }))
}

fn run_interactive(args: &Args) -> Result<ExitCode> {
    let calculator = args.calculator();
    let mut form = args.form();
    let mut view = TableView::new();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(
        out,
        "Enter keeps the value in brackets, '-' clears it, 'q' quits."
    )?;
    loop {
        for field in Field::ALL {
            match prompt_field(&mut input, &mut out, field, form.get(field))? {
                Some(value) => form.set(field, value),
                None => {
                    info!("interactive session ended");
                    return Ok(ExitCode::SUCCESS);
                }
            }
        }

        writeln!(out)?;
        match run_calculation(&calculator, &form, &mut view) {
            Ok(calculation) => print_calculation(&mut out, &calculation, &view, args)?,
            Err(error) => writeln!(out, "Input Error: {}", error)?,
        }
        writeln!(out)?;
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.interactive {
        run_interactive(&args)
    } else {
        run_once(&args)
    }
}
