use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};

use locker::models::document::PersonalDocumentKind;
use locker::wizards::{service_reference_number, GovernmentService};

/// Talk to a locker instance as a government service or as the user.
#[derive(Debug, Parser)]
#[command(name = "locker-cli", version, about)]
struct Cli {
    /// Base URL of the locker server.
    #[arg(long, env = "LOCKER_URL", default_value = "http://127.0.0.1:3000")]
    url: String,

    /// Service token used when filing government documents.
    #[arg(long, env = "LOCKER_SERVICE_TOKEN", default_value = "dev-token")]
    token: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List locker documents.
    List {
        #[arg(long, value_enum)]
        category: Option<Category>,
    },
    /// Complete a government service and file its document.
    Issue {
        #[arg(value_enum)]
        service: Service,
    },
    /// Upload a personal document.
    Upload {
        #[arg(value_enum)]
        kind: UploadKind,
        /// Title for `other` uploads.
        #[arg(long)]
        title: Option<String>,
    },
    /// Show pending disclosure requests.
    Requests,
    /// Show the consent decision in progress.
    Session,
    /// Open a disclosure request.
    Review { request_id: String },
    /// Select or deselect an optional document.
    Toggle { document_id: String },
    /// Set how long the department may view the documents.
    Duration { days: u32 },
    /// Close the review without deciding.
    Back,
    /// Refuse the request under review.
    Deny,
    /// Share the selected documents.
    Grant,
    /// Dismiss the grant summary.
    Ack,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Category {
    Government,
    Personal,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Service {
    BirthCertificate,
    PassportApplication,
    PoliceRecord,
}

impl From<Service> for GovernmentService {
    fn from(service: Service) -> Self {
        match service {
            Service::BirthCertificate => GovernmentService::BirthCertificate,
            Service::PassportApplication => GovernmentService::PassportApplication,
            Service::PoliceRecord => GovernmentService::PoliceRecord,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum UploadKind {
    Resume,
    Diploma,
    MedicalRecord,
    InsuranceCard,
    Other,
}

fn personal_kind(kind: UploadKind, title: Option<String>) -> Result<PersonalDocumentKind> {
    Ok(match kind {
        UploadKind::Resume => PersonalDocumentKind::Resume,
        UploadKind::Diploma => PersonalDocumentKind::Diploma,
        UploadKind::MedicalRecord => PersonalDocumentKind::MedicalRecord,
        UploadKind::InsuranceCard => PersonalDocumentKind::InsuranceCard,
        UploadKind::Other => match title {
            Some(title) if !title.trim().is_empty() => PersonalDocumentKind::Other(title),
            _ => bail!("--title is required for `other` uploads"),
        },
    })
}

struct Client {
    http: reqwest::Client,
    base: String,
}

impl Client {
    fn new(base: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.trim_end_matches('/').to_string(),
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value> {
        let response = request.send().await.context("Request to locker failed")?;
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        if !status.is_success() {
            let message = body["error"].as_str().unwrap_or("no details");
            bail!("locker answered {}: {}", status, message);
        }
        Ok(body)
    }

    async fn get(&self, path: &str) -> Result<Value> {
        self.send(self.http.get(format!("{}{}", self.base, path))).await
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<Value> {
        let mut request = self.http.post(format!("{}{}", self.base, path));
        if let Some(body) = body {
            request = request.json(&body);
        }
        self.send(request).await
    }

    async fn put(&self, path: &str, body: Value) -> Result<Value> {
        self.send(self.http.put(format!("{}{}", self.base, path)).json(&body))
            .await
    }
}

fn print_documents(docs: &Value) {
    for doc in docs.as_array().into_iter().flatten() {
        let verified = if doc["verified"].as_bool().unwrap_or(false) {
            "verified"
        } else {
            "unverified"
        };
        println!(
            "{} {}  [{}] {}  #{}  {}",
            doc["glyph"].as_str().unwrap_or(" "),
            doc["title"].as_str().unwrap_or("?"),
            doc["category"].as_str().unwrap_or("?"),
            verified,
            doc["document_number"].as_str().unwrap_or("?"),
            doc["id"].as_str().unwrap_or("?"),
        );
    }
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = Client::new(&cli.url);

    match cli.command {
        Command::List { category } => {
            let path = match category {
                Some(Category::Government) => "/api/v1/documents?category=government",
                Some(Category::Personal) => "/api/v1/documents?category=personal",
                None => "/api/v1/documents",
            };
            print_documents(&client.get(path).await?);
        }
        Command::Issue { service } => {
            let service = GovernmentService::from(service);
            let reference = service_reference_number(service.code(), chrono::Utc::now());
            let mut body = serde_json::to_value(service.document(reference.clone()))?;
            body["service_token"] = json!(cli.token);

            let doc = client.post("/api/v1/documents", Some(body)).await?;
            println!("Filed {} (reference {})", service.document_title(), reference);
            print_documents(&json!([doc]));
        }
        Command::Upload { kind, title } => {
            let kind = personal_kind(kind, title)?;
            let doc = client
                .post("/api/v1/documents/personal", Some(json!({ "kind": kind })))
                .await?;
            print_documents(&json!([doc]));
        }
        Command::Requests => print_json(&client.get("/api/v1/disclosures").await?)?,
        Command::Session => print_json(&client.get("/api/v1/disclosures/session").await?)?,
        Command::Review { request_id } => print_json(
            &client
                .post(&format!("/api/v1/disclosures/{}/review", request_id), None)
                .await?,
        )?,
        Command::Toggle { document_id } => print_json(
            &client
                .post(
                    "/api/v1/disclosures/session/toggle",
                    Some(json!({ "document_id": document_id })),
                )
                .await?,
        )?,
        Command::Duration { days } => print_json(
            &client
                .put("/api/v1/disclosures/session/duration", json!({ "days": days }))
                .await?,
        )?,
        Command::Back => print_json(&client.post("/api/v1/disclosures/session/back", None).await?)?,
        Command::Deny => print_json(&client.post("/api/v1/disclosures/session/deny", None).await?)?,
        Command::Grant => {
            let grant = client.post("/api/v1/disclosures/session/grant", None).await?;
            println!(
                "Shared with {} until {}",
                grant["department"].as_str().unwrap_or("?"),
                grant["expiry_date"].as_str().unwrap_or("?"),
            );
            print_json(&grant)?;
        }
        Command::Ack => print_json(
            &client
                .post("/api/v1/disclosures/session/acknowledge", None)
                .await?,
        )?,
    }

    Ok(())
}
