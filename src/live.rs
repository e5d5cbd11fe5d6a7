//! Live carousel driver.
//!
//! `page run` stands in for the page's lifetime: the load pass fires once,
//! then a repeating interval advances the carousel at the configured
//! period. The page never cancels its interval, so neither does this: it
//! runs until the tick count (if given) is reached or the process is
//! interrupted.

use anyhow::Result;
use tokio::time::{interval_at, Duration, Instant};

use crate::bindings::BindingRegistry;
use crate::config::PageConfig;
use crate::dom::PageDoc;
use crate::events::{Effect, PageEvent};
use crate::interactions::PageState;

pub async fn run_live(page: &PageConfig, ticks: Option<u64>) -> Result<()> {
    let registry = BindingRegistry::register(PageDoc::sample(), page.clone());
    let mut state = PageState::new();

    let revealed = registry.dispatch(&mut state, &PageEvent::Load).len();
    eprintln!(
        "page loaded: {} elements revealed, {} carousel cards, interval {}ms",
        revealed,
        registry.doc().carousel_cards().len(),
        page.carousel_interval_ms
    );

    if registry.doc().carousel_cards().is_empty() {
        eprintln!("no carousel cards on the page; nothing to drive");
        return Ok(());
    }

    let period = Duration::from_millis(page.carousel_interval_ms);
    // The page's interval waits one full period before the first fire.
    let mut timer = interval_at(Instant::now() + period, period);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut fired = 0u64;
    loop {
        tokio::select! {
            _ = timer.tick() => {
                let effects = registry.dispatch(&mut state, &PageEvent::Tick);
                let active = effects.iter().find_map(|e| match e {
                    Effect::AddClass { target, class } if class == "active" => Some(target.as_str()),
                    _ => None,
                });
                fired += 1;
                println!("tick {:<4} active {}", fired, active.unwrap_or("-"));
                if let Some(limit) = ticks {
                    if fired >= limit {
                        break;
                    }
                }
            }
            _ = &mut ctrl_c => {
                eprintln!("interrupted after {} ticks", fired);
                break;
            }
        }
    }

    Ok(())
}
