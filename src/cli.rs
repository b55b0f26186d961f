//! Command-line front end.
//!
//! Plays the presentation-layer role: validates form input, calls the
//! repository, and turns `NotFound`/`Conflict` into messages a person can act
//! on. Retrying after a conflict is left to the user.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::config;
use crate::db::{DatabaseError, ErrorKind, Repository, SpecialtyProvider};
use crate::models::{Physician, PhysicianDetails};
use crate::physicians::PhysicianRepository;
use crate::validation::{self, ValidationError};

#[derive(Parser, Debug)]
#[command(name = "databank")]
#[command(version, about = "Physician records kept in a local SQLite database")]
pub struct Cli {
    /// Database file (default: $DATABANK_DB, then ~/DataBank/databank.db)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all physicians
    List {
        /// Print JSON instead of one line per record
        #[arg(long)]
        json: bool,
    },
    /// Show one physician
    Show {
        id: i64,
        #[arg(long)]
        json: bool,
    },
    /// Add a physician
    Add(AddArgs),
    /// Replace a physician's fields, guarded by the version you last saw.
    /// Only the fields given are checked; the rest keep their stored values.
    Update(UpdateArgs),
    /// Delete a physician
    Delete { id: i64 },
    /// List the specialties a physician may have
    Specialties,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub specialty: String,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    pub id: i64,
    /// Version shown when the record was last read
    #[arg(long)]
    pub version: i64,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub specialty: Option<String>,
}

impl AddArgs {
    fn into_details(self) -> PhysicianDetails {
        PhysicianDetails {
            last_name: self.last_name,
            first_name: self.first_name,
            email: self.email,
            phone: self.phone,
            specialty: self.specialty,
        }
    }
}

impl UpdateArgs {
    /// Check the fields being changed. Stored values are not re-checked.
    fn validate(&self, specialties: &[String]) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        if let Some(last_name) = &self.last_name {
            errors.extend(validation::validate_name("Last name", last_name).err());
        }
        if let Some(first_name) = &self.first_name {
            errors.extend(validation::validate_name("First name", first_name).err());
        }
        if let Some(email) = &self.email {
            errors.extend(validation::validate_email(email).err());
        }
        if let Some(phone) = &self.phone {
            errors.extend(validation::validate_phone(phone).err());
        }
        if let Some(specialty) = &self.specialty {
            errors.extend(validation::validate_specialty(specialty, specialties).err());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Overlay the given fields on the stored ones; the result is the full
    /// replacement submitted to the repository.
    fn overlay(self, stored: &Physician) -> PhysicianDetails {
        let current = stored.details();
        PhysicianDetails {
            last_name: self.last_name.unwrap_or(current.last_name),
            first_name: self.first_name.unwrap_or(current.first_name),
            email: self.email.unwrap_or(current.email),
            phone: self.phone.unwrap_or(current.phone),
            specialty: self.specialty.unwrap_or(current.specialty),
        }
    }
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("{}", join_errors(.0))]
    Invalid(Vec<ValidationError>),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Output failed: {0}")]
    Io(#[from] std::io::Error),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Database(e) if e.kind() == ErrorKind::Persistence => 2,
            Self::Database(_) | Self::Invalid(_) => 1,
            Self::Json(_) | Self::Io(_) => 2,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Database(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

fn write_physician(out: &mut dyn Write, physician: &Physician) -> std::io::Result<()> {
    writeln!(out, "{physician}")?;
    writeln!(
        out,
        "    created {}  updated {}",
        physician.created.format("%Y-%m-%d %H:%M:%S"),
        physician.updated.format("%Y-%m-%d %H:%M:%S")
    )
}

fn checked_details<S: SpecialtyProvider>(
    details: PhysicianDetails,
    specialties: &S,
) -> Result<PhysicianDetails, CliError> {
    let details = validation::normalize(details);
    let known = specialties.read_all_specialties()?;
    validation::validate_details(&details, &known).map_err(CliError::Invalid)?;
    Ok(details)
}

/// Run one command against any repository and specialty source.
pub fn execute<R, S>(
    command: Commands,
    repo: &R,
    specialties: &S,
    out: &mut dyn Write,
) -> Result<(), CliError>
where
    R: Repository<Physician, PhysicianDetails>,
    S: SpecialtyProvider,
{
    match command {
        Commands::List { json } => {
            let physicians = repo.read_all()?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &physicians)?;
                writeln!(out)?;
            } else if physicians.is_empty() {
                writeln!(out, "No physicians found.")?;
            } else {
                for physician in &physicians {
                    write_physician(out, physician)?;
                }
            }
        }
        Commands::Show { id, json } => {
            let physician = repo.read_by_id(id)?.ok_or_else(|| DatabaseError::NotFound {
                entity_type: "Physician".into(),
                id: id.to_string(),
            })?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &physician)?;
                writeln!(out)?;
            } else {
                write_physician(out, &physician)?;
            }
        }
        Commands::Add(args) => {
            let details = checked_details(args.into_details(), specialties)?;
            let created = repo.create(&details)?;
            writeln!(out, "Added {created}")?;
        }
        Commands::Update(args) => {
            let id = args.id;
            let version = args.version;
            let stored = repo.read_by_id(id)?.ok_or_else(|| DatabaseError::NotFound {
                entity_type: "Physician".into(),
                id: id.to_string(),
            })?;
            let known = if args.specialty.is_some() {
                specialties.read_all_specialties()?
            } else {
                Vec::new()
            };
            args.validate(&known).map_err(CliError::Invalid)?;
            let details = validation::normalize(args.overlay(&stored));

            let mut edited = stored;
            edited.apply(details);
            edited.version = version;
            let updated = repo.update(&edited)?;
            writeln!(out, "Updated {updated}")?;
        }
        Commands::Delete { id } => match repo.delete_by_id(id) {
            Ok(()) => writeln!(out, "Deleted physician #{id}")?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                writeln!(out, "Physician #{id} was already gone.")?
            }
            Err(e) => return Err(e.into()),
        },
        Commands::Specialties => {
            for name in specialties.read_all_specialties()? {
                writeln!(out, "{name}")?;
            }
        }
    }
    Ok(())
}

/// Binary entry point: parse arguments, open the database, run, map errors
/// to exit codes.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    crate::init_tracing();

    let db_path = cli.db.unwrap_or_else(config::database_path);
    tracing::debug!("{} v{} using {}", config::APP_NAME, config::APP_VERSION, db_path.display());

    let result = PhysicianRepository::open(db_path)
        .map_err(CliError::from)
        .and_then(|repo| {
            let specialties = repo.specialties();
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            execute(cli.command, &repo, &specialties, &mut out)
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Command failed: {e}");
            eprintln!("Error: {}", e.user_message());
            ExitCode::from(e.exit_code())
        }
    }
}
