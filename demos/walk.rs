//! Walk a Jenkins server: list jobs, then show the latest build of each.
//!
//! Build with:
//! ```bash
//! cargo run --example walk
//! # or: cargo run --no-default-features --features native-tls,tracing --example walk
//! ```
//!
//! Set env vars to run against a real Jenkins:
//! - `JENKINS_URL` (e.g. `https://jenkins.example.com`)
//! - `JENKINS_USER`, `JENKINS_TOKEN` (optional; set both or neither)
//! - `JENKINS_MAX_JOBS` (default: `5`)

use jenkins_lite::Client;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    let base_url = env_or("JENKINS_URL", "https://jenkins.example.com");
    let max_jobs = env_or("JENKINS_MAX_JOBS", "5").parse::<usize>()?;

    let mut builder = Client::builder()
        .no_system_proxy()
        .timeout(Duration::from_secs(20));

    // Pass each half through separately so a half-configured environment fails loudly.
    if let Some(user) = env_opt("JENKINS_USER") {
        builder = builder.username(user);
    }
    if let Some(token) = env_opt("JENKINS_TOKEN") {
        builder = builder.password(token);
    }

    let client = builder.build()?;
    let server = client.server(&base_url)?;
    println!("{} ({} jobs)", server.url(), server.jobs().len());

    for summary in server.jobs().iter().take(max_jobs) {
        let job = summary.resolve(&client)?;
        let health = job
            .health_reports()
            .first()
            .map_or(String::from("-"), |h| format!("{}%", h.score));
        println!(
            "  - {} [{}] health={health} builds={}",
            summary.name,
            job.color().unwrap_or("?"),
            job.builds().len()
        );

        let Some(build) = job.last_build()? else {
            println!("      no builds yet");
            continue;
        };
        if !build.started() {
            println!("      last build not available yet");
            continue;
        }
        println!(
            "      #{} result={:?} building={} duration={:?}",
            build.number().unwrap_or_default(),
            build.result(),
            build.building(),
            build.duration().unwrap_or_default()
        );
    }

    Ok(())
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
