//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `federwi_core` wiring against
//!   a local-only store.
//! - Keep output deterministic for quick local sanity checks.

use chrono::Utc;
use federwi_core::{CoreConfig, DefaultContext};

fn main() {
    println!("federwi_core ping={}", federwi_core::ping());
    println!("federwi_core version={}", federwi_core::core_version());

    let data_dir = std::env::temp_dir().join("federwi-smoke");
    let context = DefaultContext::from_config(&CoreConfig::local_only(&data_dir));

    match context.daily_view(Utc::now().date_naive()) {
        Ok(view) => println!(
            "daily_view date={} weekend={} tasks={} events={} notes={}",
            view.date,
            view.is_weekend,
            view.tasks.short_term.len()
                + view.tasks.medium_term.len()
                + view.tasks.long_term.len(),
            view.calendar_events.len(),
            view.notes.len()
        ),
        Err(err) => {
            eprintln!("daily_view failed: {err}");
            std::process::exit(1);
        }
    }
}
