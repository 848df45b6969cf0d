use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ReminderError;
use crate::locale::Locale;
use crate::models::{ClassRecord, Student};
use crate::roster::RosterSelection;

pub const MAX_MESSAGE_CHARS: usize = 500;

/// Characters left alone by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn standard_message(class: &ClassRecord, locale: Locale) -> String {
    match locale {
        Locale::Es => format!(
            "Recordatorio: Tu clase de {} está programada para mañana. ¡No faltes!",
            class.name
        ),
        Locale::En => format!(
            "Reminder: your {} class is scheduled for tomorrow. Don't miss it!",
            class.name
        ),
    }
}

pub fn quick_message(class: &ClassRecord, locale: Locale) -> String {
    match locale {
        Locale::Es => format!(
            "¡Hola! Te recordamos tu clase de {} el {} a las {}. ¡Te esperamos!",
            class.name,
            locale.long_date(class.date),
            class.time_slot
        ),
        Locale::En => format!(
            "Hi! A reminder about your {} class on {} at {}. See you there!",
            class.name,
            locale.long_date(class.date),
            class.time_slot
        ),
    }
}

/// Length as the compose box counts it: UTF-16 code units, so characters
/// outside the BMP (most emoji) count twice.
pub fn message_length(message: &str) -> usize {
    message.encode_utf16().count()
}

/// `wa.me` deep link opening a chat with `phone` prefilled with `message`.
/// Everything but digits is stripped from the phone number.
pub fn whatsapp_link(phone: &str, message: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    format!(
        "https://wa.me/{}?text={}",
        digits,
        utf8_percent_encode(message, URI_COMPONENT)
    )
}

#[derive(Debug, Clone)]
pub struct ReminderDraft<'a> {
    class: &'a ClassRecord,
    recipients: Vec<&'a Student>,
    message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReminderDelivery {
    pub student_id: String,
    pub display_name: String,
    pub link: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReminderReceipt {
    pub class_id: String,
    pub sent: usize,
    pub deliveries: Vec<ReminderDelivery>,
}

impl<'a> ReminderDraft<'a> {
    pub fn new(
        class: &'a ClassRecord,
        selection: &RosterSelection,
        message: &str,
    ) -> Result<Self, ReminderError> {
        if let Some(unknown) = selection
            .ids()
            .iter()
            .find(|id| !class.roster.iter().any(|s| &s.id == *id))
        {
            return Err(ReminderError::UnknownStudent(unknown.clone()));
        }

        let recipients = selection.selected_students(&class.roster);
        if recipients.is_empty() {
            return Err(ReminderError::NoRecipients);
        }

        if message.trim().is_empty() {
            return Err(ReminderError::EmptyMessage);
        }

        let units = message_length(message);
        if units > MAX_MESSAGE_CHARS {
            return Err(ReminderError::MessageTooLong(units));
        }

        Ok(Self {
            class,
            recipients,
            message: message.to_string(),
        })
    }

    pub fn recipients(&self) -> &[&'a Student] {
        &self.recipients
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Builds one link per recipient. Nothing leaves the process; opening the
    /// links is up to the caller.
    pub fn dispatch(&self) -> ReminderReceipt {
        let deliveries: Vec<ReminderDelivery> = self
            .recipients
            .iter()
            .map(|student| {
                let link = whatsapp_link(&student.phone_number, &self.message);
                debug!(student_id = %student.id, %link, "reminder link built");
                ReminderDelivery {
                    student_id: student.id.clone(),
                    display_name: student.display_name.clone(),
                    link,
                }
            })
            .collect();

        info!(
            class_id = %self.class.id,
            recipients = deliveries.len(),
            "reminders dispatched"
        );

        ReminderReceipt {
            class_id: self.class.id.clone(),
            sent: deliveries.len(),
            deliveries,
        }
    }
}
