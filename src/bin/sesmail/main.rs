#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Command-line front end for SES mail dispatch

use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use ses_dispatch::{
    domain::mail::{
        Attachment, DeliveryMode, DeliveryTransport, DiagnosticSink, Dispatcher, EmailProvider,
        MailComposer, Message, TracingSink, DEFAULT_CHARSET,
    },
    infrastructure::{
        composition::{attachment_content_type, LettreComposer},
        ses::{HttpQueryClient, SesConfig, SesProvider},
    },
};

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
#[command(name = "sesmail", about = "Send mail and manage senders through Amazon SES")]
pub struct Args {
    /// The SES configuration
    #[clap(flatten)]
    pub ses: SesConfig,

    /// The operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Operations
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send a message
    Send(SendArgs),

    /// Start verification of a sender address
    Verify {
        /// The address to verify
        email: String,
    },

    /// Remove a verified sender address
    DeleteVerified {
        /// The address to remove
        email: String,
    },

    /// List verified sender addresses
    ListVerified,

    /// Show the sending quota
    Quota,

    /// Show the sending statistics
    Stats,
}

/// Message fields
#[derive(Debug, clap::Args)]
pub struct SendArgs {
    /// The sender address
    #[arg(long, env = "MAIL_FROM")]
    pub from: String,

    /// Comma-separated recipient addresses
    #[arg(long)]
    pub to: String,

    /// Comma-separated carbon-copy addresses
    #[arg(long)]
    pub cc: Option<String>,

    /// Comma-separated blind carbon-copy addresses
    #[arg(long)]
    pub bcc: Option<String>,

    /// Comma-separated reply-to addresses
    #[arg(long)]
    pub reply_to: Option<String>,

    /// The subject
    #[arg(long)]
    pub subject: String,

    /// The charset of the subject, display names and body parts
    #[arg(long, env = "MAIL_CHARSET", default_value = DEFAULT_CHARSET)]
    pub charset: String,

    /// The plain text body
    #[arg(long)]
    pub text: Option<String>,

    /// The HTML body
    #[arg(long)]
    pub html: Option<String>,

    /// Files to attach
    #[arg(long = "attach")]
    pub attachments: Vec<PathBuf>,

    /// Custom headers as `Name: value`
    #[arg(long = "header")]
    pub headers: Vec<String>,

    /// Always send a raw MIME envelope
    #[arg(long)]
    pub raw: bool,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let client = HttpQueryClient::new(&args.ses)?;
    let transport = DeliveryTransport::new(
        Arc::new(SesProvider::new(Arc::new(client))),
        Arc::new(TracingSink),
        args.ses.delivery_options(),
    );
    let mut dispatcher = Dispatcher::new(transport, Arc::new(LettreComposer));

    match args.command {
        Command::Send(send) => {
            let raw = send.raw;
            let message = build_message(send).await?;
            let mode = if raw {
                DeliveryMode::Raw
            } else {
                DeliveryMode::select(&message)
            };

            if !dispatcher.send(&message, mode).await {
                bail!("delivery failed: {}", last_body(&dispatcher));
            }

            println!("sent");
        }
        Command::Verify { email } => {
            if !dispatcher.verify_email_address(&email).await {
                bail!("verification failed: {}", last_body(&dispatcher));
            }

            println!("verification email sent to {email}");
        }
        Command::DeleteVerified { email } => {
            if !dispatcher.delete_verified_email_address(&email).await {
                bail!("delete failed: {}", last_body(&dispatcher));
            }

            println!("deleted {email}");
        }
        Command::ListVerified => {
            let body = dispatcher.list_verified_email_addresses().await;
            ensure_ok(&dispatcher)?;

            for address in body.verified_addresses()? {
                println!("{address}");
            }
        }
        Command::Quota => {
            let body = dispatcher.get_send_quota().await;
            ensure_ok(&dispatcher)?;

            let quota = body.send_quota()?;
            println!("max 24 hour send: {}", quota.max_24_hour_send);
            println!("max send rate:    {}", quota.max_send_rate);
            println!("sent last 24h:    {}", quota.sent_last_24_hours);
        }
        Command::Stats => {
            let body = dispatcher.get_send_statistics().await;
            ensure_ok(&dispatcher)?;

            for point in body.send_statistics()? {
                println!(
                    "{} attempts={} bounces={} complaints={} rejects={}",
                    point.timestamp,
                    point.delivery_attempts,
                    point.bounces,
                    point.complaints,
                    point.rejects
                );
            }
        }
    }

    Ok(())
}

async fn build_message(send: SendArgs) -> Result<Message> {
    let mut message =
        Message::new(&send.from, send.to.as_str(), &send.subject).charset(&send.charset);

    if let Some(cc) = send.cc {
        message = message.cc(cc);
    }
    if let Some(bcc) = send.bcc {
        message = message.bcc(bcc);
    }
    if let Some(reply_to) = send.reply_to {
        message = message.reply_to(reply_to);
    }
    if let Some(text) = &send.text {
        message = message.text_body(text);
    }
    if let Some(html) = &send.html {
        message = message.html_body(html);
    }

    for header in &send.headers {
        let (name, value) = header
            .split_once(':')
            .ok_or_else(|| anyhow!("invalid header {header:?}, expected `Name: value`"))?;
        message = message.header(name.trim(), value.trim());
    }

    for path in &send.attachments {
        let content = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read attachment {}", path.display()))?;
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow!("invalid attachment path {}", path.display()))?;

        message = message.attachment(Attachment::new(
            filename,
            &attachment_content_type(path),
            content,
        ));
    }

    Ok(message)
}

fn last_body<P, S, C>(dispatcher: &Dispatcher<P, S, C>) -> String
where
    P: EmailProvider,
    S: DiagnosticSink,
    C: MailComposer,
{
    dispatcher
        .last_result()
        .map(|outcome| outcome.body.to_string())
        .unwrap_or_default()
}

fn ensure_ok<P, S, C>(dispatcher: &Dispatcher<P, S, C>) -> Result<()>
where
    P: EmailProvider,
    S: DiagnosticSink,
    C: MailComposer,
{
    match dispatcher.last_result() {
        Some(outcome) if outcome.ok => Ok(()),
        _ => bail!("request failed: {}", last_body(dispatcher)),
    }
}
