//! HTML pages served by the REAL-UP map server.
//!
//! Three pages: the selection form, the success layout that embeds the
//! rendered map, and the error page. All interpolated text is escaped.

use std::fmt::Write as _;

use realup_map_plot_models::{City, Period, PlotFailure, PlotSummary};

const STYLESHEET: &str = r#"<link rel="stylesheet" href="/static/style.css">"#;

/// Renders the city/period selection form.
#[must_use]
pub fn index_page() -> String {
    let mut cities = String::new();
    for city in City::all() {
        let checked = if *city == City::NewYorkCity {
            " checked"
        } else {
            ""
        };
        let _ = writeln!(
            cities,
            r#"        <label><input type="radio" name="scenario-group" value="{value}"{checked}> {name}</label>"#,
            value = city.as_ref(),
            name = html_escape(city.display_name()),
        );
    }

    let mut periods = String::new();
    for period in Period::all() {
        let checked = if *period == Period::All2018 {
            " checked"
        } else {
            ""
        };
        let _ = writeln!(
            periods,
            r#"        <label><input type="radio" name="period-group" value="{value}"{checked}> {label}</label>"#,
            value = period.selection(),
            label = html_escape(period.label()),
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>REAL-UP</title>
    {STYLESHEET}
</head>
<body>
    <h1>REAL-UP</h1>
    <p>Neighbourhood sentiment and short-term rental listings.</p>
    <form action="/realup-map" method="post" enctype="multipart/form-data">
      <fieldset>
        <legend>City</legend>
{cities}      </fieldset>
      <fieldset>
        <legend>Period</legend>
{periods}      </fieldset>
      <button type="submit" name="action" value="plot">Show map</button>
    </form>
</body>
</html>
"#
    )
}

/// Renders the success page with the plot summary and the embedded map.
#[must_use]
pub fn layout_page(summary: &PlotSummary) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>REAL-UP - {city}</title>
    {STYLESHEET}
</head>
<body>
    <h1>{city}</h1>
    <p class="summary">{markers} listings plotted. <a href="/">New search</a></p>
    <iframe class="map" src="/map" title="{city}" width="100%" height="720"></iframe>
</body>
</html>
"#,
        city = html_escape(&summary.city),
        markers = summary.number_of_markers,
    )
}

/// Renders the error page exposing the raw error text.
#[must_use]
pub fn error_page(failure: &PlotFailure) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>REAL-UP - Error</title>
    {STYLESHEET}
</head>
<body>
    <h1>Something went wrong</h1>
    <dl class="error">
      <dt>type error</dt>
      <dd>{message}</dd>
    </dl>
    <p><a href="/">Back</a></p>
</body>
</html>
"#,
        message = html_escape(&failure.type_error),
    )
}

/// Escapes HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_offers_every_choice() {
        let page = index_page();
        assert!(page.contains(r#"enctype="multipart/form-data""#));
        for city in ["nyc", "chicago", "london"] {
            assert!(page.contains(&format!(r#"name="scenario-group" value="{city}""#)));
        }
        for period in ["1", "2", "3"] {
            assert!(page.contains(&format!(r#"name="period-group" value="{period}""#)));
        }
        assert!(page.contains(r#"name="action""#));
    }

    #[test]
    fn layout_embeds_map() {
        let page = layout_page(&PlotSummary {
            number_of_markers: 12,
            map_name: "templates/map.html".to_string(),
            city: "Chicago, IL".to_string(),
        });
        assert!(page.contains("<h1>Chicago, IL</h1>"));
        assert!(page.contains("12 listings plotted"));
        assert!(page.contains(r#"src="/map""#));
    }

    #[test]
    fn error_text_is_escaped() {
        let page = error_page(&PlotFailure::new("bad <input> & \"quotes\""));
        assert!(page.contains("bad &lt;input&gt; &amp; &quot;quotes&quot;"));
        assert!(!page.contains("<input>"));
    }
}
