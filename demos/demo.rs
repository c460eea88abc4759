//! Generate a reply from the command line.
//!
//! ```text
//! REPLY_API_URL=http://localhost:8080 cargo run --example demo -- friendly "Hi, are you free tomorrow?"
//! echo "Hi, are you free tomorrow?" | cargo run --example demo -- formal --copy
//! ```
//!
//! Set `RUST_LOG=reply_generator_client=debug` to see request logs.

use reply_generator_client::{Client, ReplyController, Tone};
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let copy = args.iter().any(|a| a == "--copy");
    args.retain(|a| a != "--copy");

    let tone = args.first().and_then(|a| a.parse::<Tone>().ok());
    if tone.is_some() {
        args.remove(0);
    }

    let email = if args.is_empty() {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        args.join(" ")
    };

    let client = Client::from_env()?;
    println!("Service: {}", client.base_url());

    let mut form = ReplyController::new();
    form.set_email_content(email);
    form.set_tone(tone);
    match tone {
        Some(tone) => println!("Tone: {}", tone.label()),
        None => {
            let labels: Vec<&str> = Tone::ALL.iter().map(Tone::label).collect();
            println!("Tone: unset (available: {})", labels.join(", "));
        }
    }
    println!("{} characters", form.state().draft.char_count());

    let notice = form.submit(&client).await;
    println!("[{:?}] {notice}", notice.level);

    let outcome = &form.state().outcome;
    if let Some(error) = &outcome.error_message {
        eprintln!("Error: {error}");
        return Ok(());
    }
    if outcome.has_reply() {
        println!("\nGenerated Reply:\n{}", outcome.reply_text);
    }

    if copy {
        #[cfg(feature = "system-clipboard")]
        {
            let notice = form.copy_result(&mut reply_generator_client::SystemClipboard);
            println!("[{:?}] {notice}", notice.level);
        }
        #[cfg(not(feature = "system-clipboard"))]
        eprintln!("--copy needs the system-clipboard feature");
    }

    Ok(())
}
