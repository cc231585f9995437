use boletas::domain::employee::{EmployeeUpdate, NewEmployee};
use boletas::error::{PayrollError, Result};
use boletas::interfaces::csv::employee_reader::EmployeeReader;
use boletas::interfaces::json::envelope::Envelope;
use boletas::interfaces::json::requests::{
    self, BonusSlipRequest, CompanyProfileRequest, MonthlySlipRequest, SettlementSlipRequest,
};
use boletas::services::Services;
use boletas::settings::Settings;
use clap::{Parser, Subcommand};
use miette::IntoDiagnostic;
use serde_json::json;
use std::fs::File;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Pay slip, bonus and settlement documents", long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Company profile and document numbering
    #[command(subcommand)]
    Company(CompanyCommand),
    /// Employee registry
    #[command(subcommand)]
    Employee(EmployeeCommand),
    /// Issue documents
    #[command(subcommand)]
    Slip(SlipCommand),
}

#[derive(Subcommand)]
enum CompanyCommand {
    Show,
    /// Replace the company profile with a JSON body
    Set { body: String },
    /// Consume and print the next document number
    NextNumber,
}

#[derive(Subcommand)]
enum EmployeeCommand {
    Add { body: String },
    List,
    Get { id: u64 },
    Search { term: String },
    Update { id: u64, body: String },
    Remove { id: u64 },
    /// Register every row of a CSV file
    Import { file: PathBuf },
}

#[derive(Subcommand)]
enum SlipCommand {
    Monthly { body: String },
    Bonus { body: String },
    Settlement { body: String },
    /// Resolve a generated document by file name
    Locate { filename: String },
}

/// Reads a JSON body from a file, or from stdin when `source` is `-`.
async fn read_body(source: &str) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    if source == "-" {
        tokio::io::stdin().read_to_end(&mut body).await?;
    } else {
        body = tokio::fs::read(source).await?;
    }
    Ok(body)
}

async fn run_company(services: &Services, command: CompanyCommand) -> Result<Envelope> {
    match command {
        CompanyCommand::Show => {
            let sequence = services.config.sequence().await;
            Envelope::ok("Configuración de la empresa")
                .with("empresa", services.config.profile().await)?
                .with("logo_disponible", services.config.logo_exists().await)?
                .with("boletas", sequence)
        }
        CompanyCommand::Set { body } => {
            let request: CompanyProfileRequest = requests::parse(&read_body(&body).await?)?;
            let current_logo = services.config.profile().await.logo_path;
            services
                .config
                .set_profile(request.into_profile(current_logo))
                .await?;
            Ok(Envelope::ok("Configuración guardada correctamente"))
        }
        CompanyCommand::NextNumber => {
            let number = services.config.next_document_number().await?;
            Envelope::ok("Número de boleta reservado").with("numero_boleta", number)
        }
    }
}

async fn run_employee(services: &Services, command: EmployeeCommand) -> Result<Envelope> {
    let registry = &services.registry;
    match command {
        EmployeeCommand::Add { body } => {
            let input: NewEmployee = requests::parse(&read_body(&body).await?)?;
            let employee = registry.add(input).await?;
            Envelope::ok("Empleado registrado exitosamente").with("empleado", employee)
        }
        EmployeeCommand::List => Envelope::ok("Empleados").with("empleados", registry.list().await),
        EmployeeCommand::Get { id } => {
            Envelope::ok("Empleado").with("empleado", registry.get(id).await?)
        }
        EmployeeCommand::Search { term } => {
            Envelope::ok("Resultados de búsqueda").with("empleados", registry.search(&term).await)
        }
        EmployeeCommand::Update { id, body } => {
            let update: EmployeeUpdate = requests::parse(&read_body(&body).await?)?;
            let employee = registry.update(id, update).await?;
            Envelope::ok("Empleado actualizado exitosamente").with("empleado", employee)
        }
        EmployeeCommand::Remove { id } => {
            registry.remove(id).await?;
            Ok(Envelope::ok("Empleado eliminado exitosamente"))
        }
        EmployeeCommand::Import { file } => {
            let reader = EmployeeReader::new(File::open(&file)?);
            let mut imported = Vec::new();
            let mut rejected = Vec::new();

            // Row 1 is the header.
            for (index, row) in reader.employees().enumerate() {
                let line = index + 2;
                let outcome = match row {
                    Ok(input) => registry.add(input).await,
                    Err(e) => Err(e),
                };
                match outcome {
                    Ok(employee) => imported.push(employee),
                    Err(e) => {
                        warn!(line, error = %e, "Error importing employee");
                        rejected.push(json!({ "fila": line, "error": e.to_string() }));
                    }
                }
            }

            Envelope::ok(format!(
                "{} empleados importados, {} rechazados",
                imported.len(),
                rejected.len()
            ))
            .with("empleados", imported)?
            .with("errores", rejected)
        }
    }
}

async fn run_slip(services: &Services, command: SlipCommand) -> Result<Envelope> {
    let (slip, options) = match command {
        SlipCommand::Monthly { body } => {
            requests::parse::<MonthlySlipRequest>(&read_body(&body).await?)?.into_parts()?
        }
        SlipCommand::Bonus { body } => {
            requests::parse::<BonusSlipRequest>(&read_body(&body).await?)?.into_parts()?
        }
        SlipCommand::Settlement { body } => {
            requests::parse::<SettlementSlipRequest>(&read_body(&body).await?)?.into_parts()?
        }
        SlipCommand::Locate { filename } => {
            let path = services.artifacts.locate(&filename).await?;
            return Envelope::ok("Archivo encontrado").with("path", path);
        }
    };

    let issued = services.emitter.emit(slip, options).await?;
    let filename = issued
        .artifact
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| PayrollError::storage("naming artifact", issued.artifact.display()))?;

    Envelope::ok("Boleta generada correctamente")
        .with("filename", filename)?
        .with("numero_boleta", &issued.document_number)?
        .with("path", &issued.artifact)
}

async fn run(cli: Cli) -> Result<Envelope> {
    let services = Services::open(&cli.settings).await?;
    match cli.command {
        Command::Company(command) => run_company(&services, command).await,
        Command::Employee(command) => run_employee(&services, command).await,
        Command::Slip(command) => run_slip(&services, command).await,
    }
}

fn print(envelope: &Envelope) -> miette::Result<()> {
    let text = serde_json::to_string_pretty(envelope).into_diagnostic()?;
    println!("{text}");
    Ok(())
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(envelope) => print(&envelope),
        Err(e) => {
            print(&Envelope::failure(&e))?;
            Err(e.into())
        }
    }
}
