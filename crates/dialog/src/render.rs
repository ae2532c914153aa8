//! Message rendering
//!
//! Every outbound text and keyboard the assistant produces. Flows decide
//! WHAT to say, this module decides HOW it looks, so wording and button
//! tokens stay in one place.

use std::sync::Arc;

use carcost_config::{PricingParameters, SettingKey, Statistics};
use carcost_core::{Button, ChatId, Keyboard, OutboundMessage, UserId};
use carcost_engine::{CalculationBreakdown, CountryCalculator};
use rust_decimal::{Decimal, RoundingStrategy};

/// Format a USD amount, trimming trailing zeros past the cent. Midpoints
/// round away from zero (commercial rounding), not to even.
pub(crate) fn usd(value: Decimal) -> String {
    let value = value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    format!("${value}")
}

fn main_menu_button() -> Button {
    Button::new("Main menu", "main_menu")
}

fn new_calculation_button() -> Button {
    Button::new("New calculation", "new_calculation")
}

pub fn welcome() -> OutboundMessage {
    OutboundMessage::with_keyboard(
        "Welcome! I estimate the turnkey cost of importing a car.\n\
         Press the button below or send /calculate to start, /help for the full command list.",
        Keyboard::row(vec![new_calculation_button()]),
    )
}

pub fn help() -> OutboundMessage {
    OutboundMessage::text(
        "Commands:\n\
         /calculate - start a new cost estimate\n\
         /example - a worked example with the current rates\n\
         /help - this list\n\
         /about - what the estimate covers\n\
         /info - chat diagnostics",
    )
}

pub fn about() -> OutboundMessage {
    OutboundMessage::text(
        "The estimate covers the car price, export paperwork, freight, port \
         handling, customs duty, local transport, registration and our \
         service fee. Rates are kept current by the team; the result is an \
         estimate, not a binding offer.",
    )
}

pub fn chat_info(chat: ChatId, sender: Option<UserId>) -> OutboundMessage {
    let sender = sender.map_or_else(|| "unknown".to_string(), |id| id.to_string());
    OutboundMessage::text(format!("Chat id: {chat}\nYour id: {sender}"))
}

pub fn unknown_command(name: &str) -> OutboundMessage {
    OutboundMessage::text(format!(
        "Unknown command: {name}. Send /help for the command list."
    ))
}

/// Hint shown for free text that no flow is waiting for
pub fn idle_hint() -> OutboundMessage {
    OutboundMessage::with_keyboard(
        "I did not understand that. Start a calculation or send /help.",
        Keyboard::row(vec![new_calculation_button()]),
    )
}

pub fn country_prompt(countries: &[Arc<dyn CountryCalculator>]) -> OutboundMessage {
    let buttons = countries
        .iter()
        .map(|c| {
            Button::new(
                format!("{} {}", c.flag(), c.name()),
                format!("country_{}", c.code()),
            )
        })
        .collect();
    OutboundMessage::with_keyboard(
        "Where is the car from?",
        Keyboard::new(vec![buttons, vec![main_menu_button()]]),
    )
}

pub fn price_prompt(calculator: &dyn CountryCalculator) -> OutboundMessage {
    let mut text = format!(
        "{} {} selected.\n",
        calculator.flag(),
        calculator.name()
    );
    if let Some(note) = calculator.advisory() {
        text.push_str(note);
        text.push('\n');
    }
    text.push_str("Send the car price in USD, digits only (e.g. 25000).");
    OutboundMessage::with_keyboard(text, Keyboard::row(vec![main_menu_button()]))
}

pub fn invalid_price() -> OutboundMessage {
    OutboundMessage::text("That does not look like a price. Send a positive number, e.g. 25000.")
}

pub fn delivery_prompt() -> OutboundMessage {
    OutboundMessage::with_keyboard(
        "How should the car travel?",
        Keyboard::new(vec![
            vec![
                Button::new("By sea", "delivery_ship"),
                Button::new("By rail", "delivery_train"),
            ],
            vec![main_menu_button()],
        ]),
    )
}

pub fn calculating() -> OutboundMessage {
    OutboundMessage::text("Calculating...")
}

/// The final itemized estimate. Zero-cost components are omitted so
/// placeholder routes do not render noise lines.
pub fn result(
    breakdown: &CalculationBreakdown,
    calculator: &dyn CountryCalculator,
) -> OutboundMessage {
    let mut text = format!(
        "{} {} import estimate\n\nCar price: {}\n",
        calculator.flag(),
        calculator.name(),
        usd(breakdown.car_price)
    );
    for (label, value) in breakdown.components() {
        if value == Decimal::ZERO {
            continue;
        }
        let line = if label == "delivery" {
            format!("Delivery ({}): {}\n", breakdown.delivery_kind.display_name(), usd(value))
        } else {
            format!("{}: {}\n", capitalize(label), usd(value))
        };
        text.push_str(&line);
    }
    text.push_str(&format!("\nTotal turnkey: {}", usd(breakdown.total)));
    if let Some(note) = calculator.advisory() {
        text.push_str("\n\n");
        text.push_str(note);
    }
    OutboundMessage::with_keyboard(
        text,
        Keyboard::row(vec![new_calculation_button(), main_menu_button()]),
    )
}

/// The `/example` message: a canned scenario priced with live rates
pub fn example(
    breakdown: &CalculationBreakdown,
    calculator: &dyn CountryCalculator,
) -> OutboundMessage {
    let mut message = result(breakdown, calculator);
    message.text = format!(
        "Example: a {} car from {} delivered by {}.\n\n{}",
        usd(breakdown.car_price),
        calculator.name(),
        breakdown.delivery_kind.display_name(),
        message.text
    );
    message
}

pub fn data_incomplete() -> OutboundMessage {
    OutboundMessage::with_keyboard(
        "Something went wrong with this calculation. Please start over.",
        Keyboard::row(vec![new_calculation_button()]),
    )
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

// Admin flow messages

pub fn password_prompt() -> OutboundMessage {
    OutboundMessage::text("Admin access. Send the password.")
}

pub fn access_granted() -> OutboundMessage {
    OutboundMessage::text("Access granted.")
}

pub fn access_denied() -> OutboundMessage {
    OutboundMessage::text("Wrong password. Send /admin to try again.")
}

/// Reply to an admin button pressed without an authenticated session,
/// e.g. from a stale menu message after a restart
pub fn stale_admin_button() -> OutboundMessage {
    OutboundMessage::text("This panel has expired. Send /admin to sign in again.")
}

pub fn admin_menu(save_error: Option<&str>) -> OutboundMessage {
    let mut text = String::from("Admin panel. Pick a setting to edit or an action below.");
    if let Some(err) = save_error {
        text.push_str(&format!(
            "\n\nWarning: the last settings save failed ({err}). \
             Changes are live in memory but will be lost on restart."
        ));
    }
    let mut rows: Vec<Vec<Button>> = vec![vec![Button::new(
        "Show current rates",
        "admin_show_pricing",
    )]];
    for pair in SettingKey::ALL.chunks(2) {
        rows.push(
            pair.iter()
                .map(|key| {
                    Button::new(
                        format!("Edit: {}", key.display_name()),
                        format!("admin_edit_{}", key.token()),
                    )
                })
                .collect(),
        );
    }
    rows.push(vec![
        Button::new("Reset rates to defaults", "admin_reset_all"),
        Button::new("Statistics", "admin_show_stats"),
    ]);
    rows.push(vec![
        Button::new("Log out", "admin_logout"),
        main_menu_button(),
    ]);
    OutboundMessage::with_keyboard(text, Keyboard::new(rows))
}

pub fn pricing_sheet(params: &PricingParameters) -> OutboundMessage {
    let mut text = String::from("Current rates:\n");
    for key in SettingKey::ALL {
        let value = key.display_value(params);
        let line = if matches!(key, SettingKey::CustomsPercent) {
            format!("{}: {}%\n", key.display_name(), value.normalize())
        } else {
            format!("{}: {}\n", key.display_name(), usd(value))
        };
        text.push_str(&line);
    }
    OutboundMessage::text(text)
}

pub fn enter_value(key: SettingKey, params: &PricingParameters) -> OutboundMessage {
    let current = key.display_value(params);
    let unit = if matches!(key, SettingKey::CustomsPercent) {
        "percent, e.g. 31"
    } else {
        "USD"
    };
    OutboundMessage::with_keyboard(
        format!(
            "{} is currently {}. Send the new value ({unit}).",
            key.display_name(),
            current.normalize()
        ),
        Keyboard::row(vec![Button::new("Back", "admin_back_to_menu")]),
    )
}

pub fn value_saved(key: SettingKey, params: &PricingParameters) -> OutboundMessage {
    OutboundMessage::text(format!(
        "{} set to {}.",
        key.display_name(),
        key.display_value(params).normalize()
    ))
}

pub fn invalid_value(reason: &str) -> OutboundMessage {
    OutboundMessage::text(format!("Value rejected: {reason}. Send another value."))
}

pub fn rates_reset() -> OutboundMessage {
    OutboundMessage::text("All rates reset to the built-in defaults.")
}

pub fn stats_report(stats: &Statistics) -> OutboundMessage {
    let text = format!(
        "Statistics since {}:\n\
         Calculations: {}\n\
         Total amount: {}\n\
         Average: {}\n\
         Min: {}\n\
         Max: {}\n\
         Last saved: {}",
        stats.start_time.format("%Y-%m-%d %H:%M UTC"),
        stats.total_calculations,
        usd(stats.total_amount),
        usd(stats.average()),
        usd(stats.display_min()),
        usd(stats.max_amount),
        stats.last_saved.format("%Y-%m-%d %H:%M UTC"),
    );
    OutboundMessage::with_keyboard(
        text,
        Keyboard::row(vec![
            Button::new("Reset statistics", "admin_reset_stats"),
            Button::new("Back", "admin_back_to_menu"),
        ]),
    )
}

pub fn stats_reset() -> OutboundMessage {
    OutboundMessage::text("Statistics reset.")
}

pub fn logged_out() -> OutboundMessage {
    OutboundMessage::with_keyboard(
        "Logged out of the admin panel.",
        Keyboard::row(vec![main_menu_button()]),
    )
}
