use super::DialogView;

/// Name of the item-level date input.
pub const ITEM_DATE_INPUT: &str = "ItemArchiveDate";

impl DialogView {
    /// Render the item date input and the version table.
    ///
    /// Version inputs are named from their key (`archive_{language}_{number}`).
    pub fn render_html(&self) -> String {
        let mut html = String::new();
        html.push_str(&format!(
            "<input type=\"text\" name=\"{}\" value=\"{}\" style=\"width:100%\"/>",
            ITEM_DATE_INPUT,
            html_escape(&self.item_date)
        ));
        html.push_str(
            "<table width=\"100%\" class=\"scListControl\" cellpadding=\"0\" cellspacing=\"0\">",
        );
        html.push_str(
            "<tr><td><b>Language</b></td><td><b>Version</b></td>\
             <td width=\"100%\"><b>Date and time</b></td></tr>",
        );
        for row in &self.rows {
            html.push_str(&format!(
                "<tr><td style=\"text-align:center\"><b>{}</b></td>\
                 <td style=\"text-align:center\"><b>{}</b></td>\
                 <td><input type=\"text\" name=\"{}\" value=\"{}\" style=\"width:100%\"/></td></tr>",
                html_escape(&row.key.language),
                row.key.number,
                html_escape(&row.key.input_name()),
                html_escape(&row.date)
            ));
        }
        html.push_str("</table>");
        html
    }
}

fn html_escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
