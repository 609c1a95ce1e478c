//! Widget and print window markup

use crate::consts::CARD_LOADING_CLASS;

/// Escape text for use inside a double-quoted HTML attribute
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Markup mounted into the container element.
///
/// Starts in the loading state: image hidden, loading notice shown.
pub fn widget_markup(image_url: &str) -> String {
    let src = escape_attr(image_url);
    let loading = CARD_LOADING_CLASS;
    format!(
        r#"<div class="application-container">
  <div class="message-container"></div>
  <div class="content-container">
    <div class="pick">
      <button class="refresh button primary large" title="Pick another Bingo card."><i class="fa fa-refresh"></i></button>
      <button class="print button primary large" title="Print out card."><i class="fa fa-print"></i></button>
    </div>
    <div class="card {loading}">
      <div class="loading-container"><i class="loading"></i> Loading...</div>
      <img src="{src}" alt="Bingo card" hidden />
    </div>
    <p class="caption">If you are having trouble printing using the button above, <a class="manual-print" href="{src}" target="_blank">open the bingo card</a> in a separate window and print from there.</p>
  </div>
</div>"#
    )
}

/// Document written into the print window: just the card, fit to the page
pub fn print_markup(image_url: &str) -> String {
    let src = escape_attr(image_url);
    format!(
        r#"<head>
  <title>Temporary Printing Window</title>
  <style>
    * {{ margin: 0 !important; padding: 0 !important; }}
    html, body {{ height: 100%; overflow: hidden; background: #FFF; }}
    img {{ display: block; max-width: 99%; max-height: 99%; margin: 0 auto !important; }}
  </style>
</head>
<body>
  <img src="{src}" />
</body>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr("a.png"), "a.png");
        assert_eq!(
            escape_attr(r#"x"><script>&"#),
            "x&quot;&gt;&lt;script&gt;&amp;"
        );
    }

    #[test]
    fn test_widget_markup() {
        let html = widget_markup("images/card-01.png");
        assert!(html.contains(r#"<img src="images/card-01.png" alt="Bingo card" hidden />"#));
        assert!(html.contains(r#"class="manual-print" href="images/card-01.png""#));
        assert!(html.contains(r#"class="refresh "#));
        assert!(html.contains(r#"class="print "#));
        assert!(html.contains(r#"class="card is-loading""#));
        // The spinner keeps its own class, distinct from the card state
        assert!(html.contains(r#"<i class="loading"></i>"#));
    }

    #[test]
    fn test_print_markup() {
        let html = print_markup("https://x/card.png");
        assert!(html.contains(r#"<img src="https://x/card.png" />"#));
        assert!(html.contains("max-width: 99%"));
        assert!(!html.contains("{{"));
    }
}
