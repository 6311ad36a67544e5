use anyhow::Result;
use clap::Parser;
use fortune_client::{ClientError, FormState, FortuneRequest, HttpFortuneApi, RequestForm};
use tracing_subscriber::EnvFilter;

/// Request one or more fortunes and print the session.
#[derive(Parser, Debug)]
#[command(name = "fortune-client", version, about)]
struct Args {
    /// Base URL of the fortune service
    #[arg(long, env = "FORTUNE_SERVER_URL", default_value = "http://localhost:3000")]
    server_url: String,

    /// Birth date, e.g. 1990-05-15
    #[arg(long, default_value = "")]
    birth_date: String,

    /// Birth time, e.g. 14:30
    #[arg(long)]
    birth_time: Option<String>,

    /// Birth place
    #[arg(long)]
    birth_place: Option<String>,

    /// male, female or other
    #[arg(long, default_value = "other")]
    gender: String,

    /// Fortune type; repeat to request several readings in one session
    #[arg(long = "fortune-type", default_value = "오늘의 운세")]
    fortune_types: Vec<String>,

    /// neutral, optimistic, pessimistic, or free text
    #[arg(long, default_value = "")]
    tone: String,

    /// Additional question for the reader
    #[arg(long, default_value = "")]
    question: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut form = RequestForm::new(HttpFortuneApi::new(&args.server_url));

    let mut status = form.status();
    tokio::spawn(async move {
        while status.changed().await.is_ok() {
            if *status.borrow_and_update() == FormState::Generating {
                eprintln!("운세를 보고 있습니다...");
            }
        }
    });

    for fortune_type in &args.fortune_types {
        let input = FortuneRequest {
            birth_date: args.birth_date.clone(),
            birth_time: args.birth_time.clone(),
            birth_place: args.birth_place.clone(),
            gender: args.gender.clone(),
            fortune_type: fortune_type.clone(),
            tone: args.tone.clone(),
            custom_question: args.question.clone(),
        };

        match form.submit(input).await {
            Ok(_) => {}
            Err(ClientError::Validation(message)) => {
                eprintln!("{}", message);
                std::process::exit(2);
            }
            Err(e) => eprintln!("{}: {}", fortune_type, e),
        }
    }

    let session = form.session();
    for tab in session.tabs() {
        let marker = if tab.active { "*" } else { " " };
        println!("{} {} ({})", marker, tab.label, tab.fortune_type);
    }
    println!();
    println!("{}", session.render_active());

    Ok(())
}
