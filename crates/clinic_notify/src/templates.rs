// --- File: crates/clinic_notify/src/templates.rs ---
use clinic_common::models::AppointmentMode;
use clinic_config::ClinicConfig;

/// What a confirmation message needs to know about the appointment.
#[derive(Debug, Clone)]
pub struct AppointmentNotice {
    pub patient_name: String,
    /// e.g. `20/10/2026`
    pub display_date: String,
    /// e.g. `10:00 AM`
    pub display_time: String,
    pub mode: AppointmentMode,
}

pub fn confirmation_subject(clinic: &ClinicConfig) -> String {
    format!("Your Appointment Confirmation with {}", clinic.name)
}

/// Plain-text confirmation, sent as SMS and shown on the wizard's
/// confirmation screen.
pub fn confirmation_sms(clinic: &ClinicConfig, notice: &AppointmentNotice) -> String {
    format!(
        "✅ Appointment confirmed!\n\
         📅 Date: {}\n\
         🕘 Time: {}\n\
         👩‍⚕️ Doctor: {}\n\
         📍 Location: Please arrive 15 minutes early at the clinic.",
        notice.display_date, notice.display_time, clinic.doctor_name
    )
}

pub fn confirmation_email_html(clinic: &ClinicConfig, notice: &AppointmentNotice) -> String {
    let clinic_name = escape_html(&clinic.name);
    format!(
        r#"<div style="font-family: Arial, sans-serif; padding: 20px; color: #333;">
  <h2 style="color: #0f62fe;">Appointment Confirmed ✅</h2>
  <p>Dear <strong>{name}</strong>,</p>
  <p>Thank you for booking your appointment with <strong>{clinic_name}</strong>. We're pleased to confirm the details below:</p>
  <table style="border-collapse: collapse; margin-top: 10px; margin-bottom: 20px;">
    <tr><td style="padding: 8px 12px;"><strong>Date:</strong></td><td style="padding: 8px 12px;">{date}</td></tr>
    <tr><td style="padding: 8px 12px;"><strong>Time:</strong></td><td style="padding: 8px 12px;">{time}</td></tr>
    <tr><td style="padding: 8px 12px;"><strong>Appointment Mode:</strong></td><td style="padding: 8px 12px;">{mode}</td></tr>
  </table>
  <p>Please make sure to:</p>
  <ul style="margin-left: 20px;">
    <li>Arrive at least <strong>15 minutes early</strong> for your appointment.</li>
    <li>Bring any <strong>relevant medical documents or reports</strong>.</li>
    <li>Ensure your phone/email is reachable for any updates or reminders.</li>
  </ul>
  <p>If you need to reschedule or cancel, kindly contact us at least <strong>24 hours in advance</strong>.</p>
  <p style="margin-top: 20px;">We look forward to seeing you!</p>
  <p>Warm regards,</p>
  <p><strong>{clinic_name}</strong><br/>
  📍 {address}<br/>
  📞 {phone}<br/>
  🔗 {website}</p>
</div>"#,
        name = escape_html(&notice.patient_name),
        clinic_name = clinic_name,
        date = escape_html(&notice.display_date),
        time = escape_html(&notice.display_time),
        mode = notice.mode.label(),
        address = escape_html(&clinic.address),
        phone = escape_html(&clinic.phone),
        website = escape_html(&clinic.website),
    )
}

// Patient names end up inside HTML.
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
