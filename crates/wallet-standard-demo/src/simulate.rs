//! Runs a scenario on a fresh window

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{info, warn};

use wallet_standard::{
    register_wallet_on, ConnectInput, StandardConnectFeature, Wallet, WalletEventsWindow, Window,
    WindowEvent, WindowEventType, STANDARD_CONNECT,
};
use wallet_standard_app::{AppContext, Wallets};
use wallet_standard_ui::UiRegistry;

use crate::report::{Report, WalletReport};
use crate::scenario::{Result, Scenario, StartupOrder};

/// Simulate one page: wallets and the app start in the scenario's order,
/// then every discovered wallet is projected for the UI
pub fn run(scenario: &Scenario) -> Result<Report> {
    let built = scenario.build_wallets()?;
    let wallets: Vec<(bool, Arc<dyn Wallet>)> = scenario
        .wallets
        .iter()
        .zip(built)
        .map(|(spec, wallet)| (spec.legacy, wallet as Arc<dyn Wallet>))
        .collect();

    let window = Arc::new(Window::new());
    let events = record_events(window.as_ref());
    let app = AppContext::new(Some(window.clone()));
    let registry = UiRegistry::new();

    let split = match scenario.order {
        StartupOrder::AppFirst => 0,
        StartupOrder::WalletsFirst => wallets.len(),
        StartupOrder::Interleaved => wallets.len() / 2,
    };
    let (before, after) = wallets.split_at(split);

    for (legacy, wallet) in before {
        announce(window.as_ref(), *legacy, wallet);
    }
    let discovered = start_app(&app, scenario.legacy_app);
    for (legacy, wallet) in after {
        announce(window.as_ref(), *legacy, wallet);
    }

    let found = discovered.get();
    if found.len() < wallets.len() {
        warn!(
            "{} of {} wallet(s) were not discovered",
            wallets.len() - found.len(),
            wallets.len()
        );
    }
    info!("Discovered {} wallet(s)", found.len());

    let reports = found
        .iter()
        .map(|wallet| project(&registry, wallet))
        .collect();

    let events = events.lock().clone();
    Ok(Report {
        order: scenario.order,
        events,
        wallets: reports,
    })
}

fn record_events(window: &dyn WalletEventsWindow) -> Arc<Mutex<Vec<String>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    for event_type in [WindowEventType::RegisterWallet, WindowEventType::AppReady] {
        let sink = events.clone();
        let listener = Arc::new(move |event: &WindowEvent| {
            sink.lock().push(event.event_type().to_string());
        });
        if let Err(e) = window.add_event_listener(event_type, listener) {
            warn!("Could not record {} events: {}", event_type, e);
        }
    }
    events
}

#[allow(deprecated)]
fn announce(window: &dyn WalletEventsWindow, legacy: bool, wallet: &Arc<dyn Wallet>) {
    info!("Wallet '{}' announcing{}", wallet.name(), if legacy { " (legacy)" } else { "" });
    if legacy {
        wallet_standard::deprecated_register_wallet_on(window, wallet.clone());
    } else {
        register_wallet_on(window, wallet.clone());
    }
}

#[allow(deprecated)]
fn start_app(app: &AppContext, legacy: bool) -> Wallets {
    info!("App starting{}", if legacy { " (with navigator.wallets)" } else { "" });
    if legacy {
        app.deprecated_get_wallets()
    } else {
        app.get_wallets()
    }
}

fn project(registry: &UiRegistry, wallet: &Arc<dyn Wallet>) -> WalletReport {
    let ui_wallet = registry.get_or_create_ui_wallet_for_standard_wallet(wallet);
    let again = registry.get_or_create_ui_wallet_for_standard_wallet(wallet);

    let mut report = WalletReport::from_ui_wallet(&ui_wallet);
    report.snapshot_reused = Arc::ptr_eq(&ui_wallet, &again);
    report.connected_accounts = registry
        .get_wallet_feature(&ui_wallet, STANDARD_CONNECT)
        .ok()
        .and_then(|feature| feature.downcast::<StandardConnectFeature>())
        .and_then(|connect| match connect.connect(ConnectInput { silent: true }) {
            Ok(output) => Some(output.accounts.len()),
            Err(e) => {
                warn!("{} failed for '{}': {}", STANDARD_CONNECT, ui_wallet.name(), e);
                None
            }
        });
    report
}
