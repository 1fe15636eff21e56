//! Localized interface strings.

use kaiwa_engine::Locale;

/// Invitation shown in place of an empty conversation.
#[must_use]
pub fn empty_invitation(locale: Locale) -> &'static str {
    match locale {
        Locale::Ja => "こんにちは、お手伝いできることはありますか？",
        Locale::En => "Hello! How can I help you?",
    }
}

/// Placeholder text for the input bar.
///
/// While a reply is outstanding the bar is disabled and shows a sending label.
#[must_use]
pub fn input_placeholder(locale: Locale, pending: bool) -> &'static str {
    match (locale, pending) {
        (Locale::Ja, false) => "メッセージを入力...",
        (Locale::Ja, true) => "送信中...",
        (Locale::En, false) => "Type a message...",
        (Locale::En, true) => "Sending...",
    }
}

/// Indicator appended after the last turn while awaiting a reply.
#[must_use]
pub fn pending_indicator(_locale: Locale) -> &'static str {
    "Thinking..."
}

/// Title shown at the top of the screen.
#[must_use]
pub fn screen_title(_locale: Locale) -> &'static str {
    "AI Chat"
}
