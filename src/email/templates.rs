pub fn render_password_reset(reset_link: &str, ttl_minutes: i64, year: i32) -> String {
    let link = escape(reset_link);
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Password Reset Request</title></head>
<body style="font-family: sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Password Reset Request</h2>
    <p>Hello,</p>
    <p>We received a request to reset your password. Click the button below to choose a new one:</p>
    <p style="text-align: center;"><a href="{link}" style="display: inline-block; padding: 12px 24px; background: #4caf50; color: white; text-decoration: none; border-radius: 4px;">Reset Password</a></p>
    <p>If the button does not work, copy this link into your browser:</p>
    <div style="background: #f5f5f5; padding: 10px; border-radius: 3px; word-break: break-all; font-family: monospace; font-size: 12px;">{link}</div>
    <ul>
        <li>This link is valid for {ttl_minutes} minutes.</li>
        <li>If you didn't request a password reset, you can ignore this email.</li>
        <li>Do not share this link with anyone.</li>
    </ul>
    <p style="color: #666; font-size: 12px; border-top: 1px solid #ddd; padding-top: 20px;">This message was sent automatically, please do not reply.<br>&copy; {year}</p>
</body>
</html>"#
    )
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
