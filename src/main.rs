use anyhow::Result;
use careers_client::form::FilePayload;
use careers_client::listing::LoadState;
use careers_client::paging::PageItem;
use careers_client::prefs::Prefs;
use careers_client::{
    ApplicationForm, ClientConfig, FormPhase, FormSession, JobsClient, Language, ListingSession,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "careers")]
#[command(about = "Browse job openings and submit applications")]
struct Cli {
    /// UI language (th, en, zh); defaults to the stored preference
    #[arg(long)]
    lang: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List open positions
    List {
        /// Free-text search over title/department/level/location
        #[arg(long, default_value = "")]
        q: String,
        #[arg(long, default_value = "ALL")]
        country: String,
        #[arg(long, default_value = "ALL")]
        department: String,
        #[arg(long, default_value = "ALL")]
        level: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one job posting
    Show { job_id: String },
    /// Submit an application for a job
    Apply {
        job_id: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "+66")]
        phone_code: String,
        #[arg(long, default_value = "Thailand")]
        country: String,
        #[arg(long, default_value = "")]
        source: String,
        #[arg(long)]
        resume: PathBuf,
        #[arg(long)]
        attachment: Vec<PathBuf>,
        #[arg(long)]
        skill: Vec<String>,
        /// Accept the data-processing terms
        #[arg(long)]
        agree: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::load()?;

    let mut prefs = Prefs::load(&config.prefs_path);
    let lang = match cli.lang.as_deref() {
        Some(code) => {
            let lang: Language = code.parse().unwrap_or_default();
            if lang != prefs.language {
                prefs.language = lang;
                prefs.save(&config.prefs_path)?;
            }
            lang
        }
        None => prefs.language,
    };

    let client = JobsClient::new(&config)?;
    if client.is_mock() {
        info!("running against the mock dataset (no CAREERS_API_BASE)");
    }

    match cli.command {
        Command::List {
            q,
            country,
            department,
            level,
            page,
        } => {
            let mut session = ListingSession::new(lang);
            session.filters.set_country(country);
            session.filters.set_department(department);
            session.filters.set_level(level);
            session.filters.set_q(q);
            session.filters.set_page(page);

            session.refresh(&client).await?;

            match session.state() {
                LoadState::Failed(message) => anyhow::bail!("{message}"),
                _ if session.is_empty() => println!("No open positions match your filters."),
                _ => {
                    println!(
                        "{} openings (page {}/{})",
                        session.total_count(),
                        session.current_page(),
                        session.total_pages()
                    );
                    for job in session.page_jobs() {
                        println!(
                            "  {:<24} {:<32} {} / {} / {}",
                            job.job_id, job.title, job.country, job.department, job.level
                        );
                    }
                    let controls: Vec<String> = session
                        .pagination_items()
                        .into_iter()
                        .map(|item| match item {
                            PageItem::Number(n) => n.to_string(),
                            PageItem::Ellipsis => "...".to_string(),
                        })
                        .collect();
                    if !controls.is_empty() {
                        println!("  pages: {}", controls.join(" "));
                    }
                }
            }
        }

        Command::Show { job_id } => match client.get_job(&job_id, lang).await? {
            None => println!("Job {job_id} not found."),
            Some(job) => {
                println!("{} ({})", job.title, job.job_id);
                println!("{} / {} / {}", job.country, job.department, job.level);
                println!("Location: {}", job.location);
                if job.headcount() > 0 {
                    println!("Openings: {}", job.headcount());
                }
                if !job.description.is_empty() {
                    println!("\n{}", job.description);
                }
                if !job.qualifications.is_empty() {
                    println!("\nQualifications:\n{}", job.qualifications);
                }
            }
        },

        Command::Apply {
            job_id,
            first_name,
            last_name,
            email,
            phone,
            phone_code,
            country,
            source,
            resume,
            attachment,
            skill,
            agree,
        } => {
            let job = client
                .get_job(&job_id, lang)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Job {job_id} not found"))?;
            println!("Applying for: {} ({})", job.title, job.location);

            let mut form = ApplicationForm::new();
            form.first_name = first_name;
            form.last_name = last_name;
            form.email = email;
            form.phone_code = phone_code;
            form.phone_number = phone;
            form.residence_country = country;
            form.source_channel = source;
            form.terms_accepted = agree;
            for s in &skill {
                form.add_custom_skill(s);
            }

            let resume_bytes = tokio::fs::read(&resume).await?;
            form.set_resume(FilePayload::new(file_name(&resume), resume_bytes))?;

            let mut batch = Vec::new();
            for path in &attachment {
                batch.push(FilePayload::new(file_name(path), tokio::fs::read(path).await?));
            }
            if !batch.is_empty() {
                form.add_attachments(batch)?;
            }

            if !form.can_submit() {
                anyhow::bail!(
                    "Required fields are missing (name, email, phone, country, source, \
                     --agree, resume)"
                );
            }

            let mut session = FormSession::new();
            session.form = form;
            session.submit(&client, &job_id).await?;

            match &session.phase {
                FormPhase::Succeeded => {
                    let id = session
                        .last_outcome
                        .as_ref()
                        .and_then(|o| o.application_id.clone());
                    match id {
                        Some(id) => println!("Application submitted (id: {id})."),
                        None => println!("Application submitted."),
                    }
                }
                FormPhase::Failed(message) => anyhow::bail!("Submit failed: {message}"),
                _ => {}
            }
        }
    }

    Ok(())
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string())
}
