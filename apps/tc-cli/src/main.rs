use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tc_core::units::{k, pa};
use tc_gas::{GasError, GasModel, GasState, SpeciesTable, TwoTemperatureGas};
use tc_kinetics::{KineticsError, RateScheme};
use tc_transport::{TransportError, TransportModel};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
enum CliError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Gas(#[from] GasError),

    #[error(transparent)]
    Kinetics(#[from] KineticsError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Bad mass fraction `{0}` (expected NAME=VALUE)")]
    MassFraction(String),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "tc-cli")]
#[command(about = "Reacting-gas thermochemistry: states, rate constants, transport properties", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep mixture viscosity and conductivity over temperature
    TransProps {
        /// Path to the gas-model YAML file
        gas_path: PathBuf,
        /// First temperature [K]
        #[arg(long, default_value_t = 200.0)]
        t_start: f64,
        /// Temperature increment [K]
        #[arg(long, default_value_t = 100.0)]
        dt: f64,
        /// Number of temperatures
        #[arg(long, default_value_t = 199)]
        steps: usize,
        /// Pressure [Pa]
        #[arg(long, default_value_t = 1.0e5)]
        pressure: f64,
        /// Mass fraction as NAME=VALUE, repeatable; unlisted species are zero
        #[arg(long = "massf", required = true)]
        massf: Vec<String>,
    },
    /// Evaluate a two-temperature state from p, T and Tve
    State {
        /// Path to the gas-model YAML file
        gas_path: PathBuf,
        /// Pressure [Pa]
        #[arg(long)]
        pressure: f64,
        /// Trans-rotational temperature [K]
        #[arg(long)]
        t: f64,
        /// Vibro-electronic temperature [K], defaults to T
        #[arg(long)]
        t_ve: Option<f64>,
        /// Mass fraction as NAME=VALUE, repeatable
        #[arg(long = "massf", required = true)]
        massf: Vec<String>,
    },
    /// Evaluate the forward and backward rate constants of a scheme
    Rates {
        /// Path to the gas-model YAML file
        gas_path: PathBuf,
        /// Path to the reaction-scheme YAML file
        scheme_path: PathBuf,
        /// Pressure [Pa]
        #[arg(long)]
        pressure: f64,
        /// Trans-rotational temperature [K]
        #[arg(long)]
        t: f64,
        /// Vibro-electronic temperature [K], defaults to T
        #[arg(long)]
        t_ve: Option<f64>,
        /// Mass fraction as NAME=VALUE, repeatable
        #[arg(long = "massf", required = true)]
        massf: Vec<String>,
    },
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::TransProps {
            gas_path,
            t_start,
            dt,
            steps,
            pressure,
            massf,
        } => cmd_trans_props(&gas_path, t_start, dt, steps, pressure, &massf),
        Commands::State {
            gas_path,
            pressure,
            t,
            t_ve,
            massf,
        } => cmd_state(&gas_path, pressure, t, t_ve.unwrap_or(t), &massf),
        Commands::Rates {
            gas_path,
            scheme_path,
            pressure,
            t,
            t_ve,
            massf,
        } => cmd_rates(&gas_path, &scheme_path, pressure, t, t_ve.unwrap_or(t), &massf),
    }
}

fn read(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_species(path: &Path) -> CliResult<SpeciesTable> {
    let species = SpeciesTable::from_yaml_str(&read(path)?)?;
    info!(path = %path.display(), n_species = species.len(), "gas model loaded");
    Ok(species)
}

/// `NAME=VALUE` pairs into a mass-fraction vector ordered like the species table.
fn parse_massf(species: &SpeciesTable, pairs: &[String]) -> CliResult<Vec<f64>> {
    let mut massf = vec![0.0; species.len()];
    for pair in pairs {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| CliError::MassFraction(pair.clone()))?;
        let index = species
            .index_of(name.trim())
            .ok_or_else(|| CliError::MassFraction(pair.clone()))?;
        massf[index] = value
            .trim()
            .parse()
            .map_err(|_| CliError::MassFraction(pair.clone()))?;
    }
    Ok(massf)
}

fn updated_state(
    model: &TwoTemperatureGas,
    pressure: f64,
    t: f64,
    t_ve: f64,
    massf: Vec<f64>,
) -> CliResult<GasState> {
    let mut gs = GasState::with_pt(pa(pressure), k(t), k(t_ve), massf)?;
    model.update_thermo_from_pt(&mut gs)?;
    model.update_sound_speed(&mut gs)?;
    Ok(gs)
}

fn cmd_trans_props(
    gas_path: &Path,
    t_start: f64,
    dt: f64,
    steps: usize,
    pressure: f64,
    massf: &[String],
) -> CliResult<()> {
    let species = load_species(gas_path)?;
    let massf = parse_massf(&species, massf)?;
    let transport = TransportModel::from_species(&species)?;
    // Validates the composition once up front.
    GasState::with_pt(pa(pressure), k(t_start), k(t_start), massf.clone())?;

    let rows = (0..steps)
        .into_par_iter()
        .map_init(
            || transport.clone(),
            |model, i| -> CliResult<(f64, f64, f64)> {
                let t = t_start + dt * i as f64;
                let mut gs = GasState::new(massf.len(), 1);
                gs.p = pressure;
                gs.set_temperatures(t, t);
                gs.massf.copy_from_slice(&massf);
                model.update_trans_coeffs(&mut gs)?;
                Ok((t, gs.mu, gs.k))
            },
        )
        .collect::<CliResult<Vec<_>>>()?;

    println!("# T[K] mu[Pa.s] k[W/(m.K)]");
    for (t, mu, k) in rows {
        println!("{t} {mu:e} {k:e}");
    }
    Ok(())
}

fn cmd_state(gas_path: &Path, pressure: f64, t: f64, t_ve: f64, massf: &[String]) -> CliResult<()> {
    let species = load_species(gas_path)?;
    let massf = parse_massf(&species, massf)?;
    let model = TwoTemperatureGas::new(species.clone())?;
    let mut gs = updated_state(&model, pressure, t, t_ve, massf)?;

    println!("p      = {:.6e} Pa", gs.p);
    println!("p_e    = {:.6e} Pa", gs.p_e);
    println!("rho    = {:.6e} kg/m^3", gs.rho);
    println!("T      = {:.3} K", gs.t);
    println!("Tve    = {:.3} K", gs.t_ve());
    println!("u      = {:.6e} J/kg", gs.u);
    println!("u_ve   = {:.6e} J/kg", gs.u_ve());
    println!("h      = {:.6e} J/kg", model.enthalpy(&gs));
    println!("s      = {:.6e} J/(kg.K)", model.entropy(&gs));
    println!("cp     = {:.6e} J/(kg.K)", model.cp(&gs));
    println!("cv     = {:.6e} J/(kg.K)", model.cv(&gs));
    println!("gamma  = {:.6}", model.gamma(&gs));
    println!("a      = {:.3} m/s", gs.a);

    if species.iter().all(|s| s.transport.is_some()) {
        let mut transport = TransportModel::from_species(&species)?;
        transport.update_trans_coeffs(&mut gs)?;
        println!("mu     = {:.6e} Pa.s", gs.mu);
        println!("k      = {:.6e} W/(m.K)", gs.k);
    }
    Ok(())
}

fn cmd_rates(
    gas_path: &Path,
    scheme_path: &Path,
    pressure: f64,
    t: f64,
    t_ve: f64,
    massf: &[String],
) -> CliResult<()> {
    let species = load_species(gas_path)?;
    let massf = parse_massf(&species, massf)?;
    let model = TwoTemperatureGas::new(species.clone())?;
    let scheme = RateScheme::from_yaml_str(&read(scheme_path)?, species)?;
    let gs = updated_state(&model, pressure, t, t_ve, massf)?;

    let mut kf = vec![0.0; scheme.len()];
    let mut kb = vec![0.0; scheme.len()];
    scheme.eval_forward(&gs, &mut kf)?;
    scheme.eval_backward(&gs, &mut kb)?;

    println!("# T = {} K, Tve = {} K, rho = {:.6e} kg/m^3", gs.t, gs.t_ve(), gs.rho);
    for ((reaction, kf), kb) in scheme.reactions().iter().zip(&kf).zip(&kb) {
        println!(
            "{:<32} {:<26} kf = {:.6e}  kb = {:.6e}",
            reaction.label,
            reaction.forward.model_name(),
            kf,
            kb
        );
    }
    Ok(())
}
