//! Self-contained HTML report for a fitted topic model.

use crate::error::Result;
use crate::topics::LdaModel;
use std::fs;
use std::path::Path;

/// Writes an HTML page with one expandable section per topic, listing the
/// top terms and their within-topic probabilities as horizontal bars.
pub fn write_topic_report(
    path: &Path,
    model: &LdaModel,
    coherence: f64,
    top_n: usize,
) -> Result<()> {
    let topics = model.top_words(top_n);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Topic Model Report</title>\n<style>\n");
    html.push_str(
        "body { font-family: sans-serif; margin: 2em auto; max-width: 56em; }\n\
         details { border: 1px solid #ccc; border-radius: 4px; margin: 0.5em 0; padding: 0.5em 1em; }\n\
         summary { cursor: pointer; font-weight: bold; }\n\
         .bar { background: #4472c4; height: 0.9em; display: inline-block; vertical-align: middle; }\n\
         .term { display: inline-block; width: 10em; }\n\
         .prob { color: #666; margin-left: 0.5em; font-size: 0.85em; }\n",
    );
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str(&format!(
        "<h1>Topic Model Report</h1>\n<p>{} topics, coherence score {:.4}, {} documents.</p>\n",
        model.num_topics(),
        coherence,
        model.num_documents()
    ));

    let max_prob = topics
        .iter()
        .flat_map(|terms| terms.iter().map(|(_, p)| *p))
        .fold(0.0f64, f64::max)
        .max(f64::MIN_POSITIVE);

    for (topic_index, terms) in topics.iter().enumerate() {
        let headline: Vec<&str> = terms.iter().take(3).map(|(term, _)| term.as_str()).collect();
        html.push_str(&format!(
            "<details{}>\n<summary>Topic {} &mdash; {}</summary>\n<div>\n",
            if topic_index == 0 { " open" } else { "" },
            topic_index,
            headline.join(", ")
        ));
        for (term, probability) in terms {
            let width = (probability / max_prob * 30.0).max(0.2);
            html.push_str(&format!(
                "<div><span class=\"term\">{}</span><span class=\"bar\" style=\"width: {:.1}em\"></span><span class=\"prob\">{:.4}</span></div>\n",
                term, width, probability
            ));
        }
        html.push_str("</div>\n</details>\n");
    }

    html.push_str("</body>\n</html>\n");
    fs::write(path, html)?;
    Ok(())
}
