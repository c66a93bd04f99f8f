use url::Url;

/// Shown where a news image is missing or unusable
pub const IMAGE_PLACEHOLDER: &str = "[ no image ]";

const CARD_LINE_WIDTH: usize = 30;

/// Wrap a description into at most `max_lines` card lines of ~30 columns
///
/// Words are packed greedily; when the text does not fit, the last line is
/// cut to 27 characters and suffixed with "...".
pub fn truncate_description(text: &str, max_lines: usize) -> Vec<String> {
    if text.trim().is_empty() || max_lines == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate_len = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if candidate_len > CARD_LINE_WIDTH && !current.is_empty() {
            if lines.len() + 1 == max_lines {
                lines.push(ellipsize(&format!("{} {}", current, word)));
                return lines;
            }
            lines.push(fit(std::mem::take(&mut current)));
            current.push_str(word);
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(fit(current));
    }
    lines
}

/// A single word wider than the card is cut where it stands
fn fit(line: String) -> String {
    if line.chars().count() > CARD_LINE_WIDTH {
        ellipsize(&line)
    } else {
        line
    }
}

fn ellipsize(line: &str) -> String {
    let cut: String = line.chars().take(CARD_LINE_WIDTH - 3).collect();
    format!("{}...", cut)
}

/// Short label for an image URL: its host, or the placeholder if unusable
pub fn image_label(image_url: Option<&str>) -> String {
    image_url
        .and_then(|raw| Url::parse(raw).ok())
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .and_then(|url| url.host_str().map(|h| format!("[ image: {} ]", h)))
        .unwrap_or_else(|| IMAGE_PLACEHOLDER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_line() {
        assert_eq!(truncate_description("Hello world", 2), vec!["Hello world"]);
        assert!(truncate_description("   ", 2).is_empty());
    }

    #[test]
    fn test_wraps_into_two_lines() {
        let lines = truncate_description("The quick brown fox jumps over the lazy dog", 2);
        assert_eq!(lines, vec!["The quick brown fox jumps over", "the lazy dog"]);
    }

    #[test]
    fn test_overflow_is_ellipsized() {
        let text = "one two three four five six seven eight nine ten eleven twelve thirteen";
        let lines = truncate_description(text, 2);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with("..."));
        assert_eq!(lines[1].chars().count(), 30);
    }

    #[test]
    fn test_single_long_word() {
        let lines = truncate_description(&"x".repeat(40), 2);
        assert_eq!(lines, vec![format!("{}...", "x".repeat(27))]);
    }

    #[test]
    fn test_long_leading_word_stays_inside_card() {
        let text = format!("{} tail", "x".repeat(40));
        let lines = truncate_description(&text, 2);
        assert_eq!(lines, vec![format!("{}...", "x".repeat(27)), "tail".to_string()]);
        assert!(lines.iter().all(|line| line.chars().count() <= 30));
    }

    #[test]
    fn test_image_label() {
        assert_eq!(
            image_label(Some("https://cdn.example.com/a.png")),
            "[ image: cdn.example.com ]"
        );
        assert_eq!(image_label(Some("not a url")), IMAGE_PLACEHOLDER);
        assert_eq!(image_label(None), IMAGE_PLACEHOLDER);
    }
}
