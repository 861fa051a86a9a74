//! End-to-end tests: PHP source in, windowed HTML out

use codeframe::highlight::config::HighlightConfig;
use codeframe::highlight::testing::assert_balanced;
use codeframe::highlight::{highlighter, CodeHighlighter};
use codeframe::highlight_php;
use rstest::rstest;

const REDACTED_CALL: &str = "<?\nfoo(\n  /*sensitive{*/'secret'/*}*/,\n  1\n);\n";

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

#[test]
fn test_redacted_call_markup() {
    let doc = highlighter::highlight(REDACTED_CALL, &HighlightConfig::default()).unwrap();
    let lines: Vec<&str> = doc.body().split('\n').collect();
    assert_eq!(
        lines,
        vec![
            "&lt;?",
            "foo<span class=\"codeframe-keyword\">(",
            "  *****,",
            "  </span><span class=\"codeframe-number\">1",
            "</span><span class=\"codeframe-keyword\">);</span>",
        ]
    );
}

#[test]
fn test_redacted_call_window() {
    let html = highlight_php(REDACTED_CALL, 3, 0).unwrap();

    insta::assert_snapshot!(html.as_str(), @r###"
<pre class="codeframe"><div><code><span class="codeframe-line">1:</span>    &lt;?
<span class="codeframe-line">2:</span>    foo<span class="codeframe-keyword">(
</span><span class="codeframe-line-highlight">3:      *****,</span>
<span class="codeframe-keyword"><span class="codeframe-line">4:</span>      </span><span class="codeframe-number">1
<span class="codeframe-line">5:</span>    </span><span class="codeframe-keyword">);</span>
</code></div></pre>
"###);

    assert_eq!(html.as_str().matches("codeframe-line-highlight").count(), 1);
    assert!(!html.as_str().contains("secret"));
    assert_balanced(html.as_str());
}

#[rstest]
#[case::first_line(1)]
#[case::last_line(5)]
#[case::past_the_end(6)]
#[case::far_out_of_range(10_000)]
#[case::zero(0)]
fn test_redacted_call_any_target_is_balanced(#[case] target: usize) {
    let html = highlight_php(REDACTED_CALL, target, 2).unwrap();
    assert_balanced(html.as_str());
    let flagged = html.as_str().matches("codeframe-line-highlight").count();
    assert_eq!(flagged, usize::from((1..=5).contains(&target)));
    assert!(html.as_str().contains("\">1:"));
}

#[test]
fn test_multiline_comment_window_starts_inside_comment() {
    let mut source = String::from("<?php\n/*\n");
    for n in 0..30 {
        source.push_str(&format!(" * line {}\n", n));
    }
    source.push_str(" */\n$x = 1;\n");

    let config = HighlightConfig {
        max_lines: 5,
        ..HighlightConfig::default()
    };
    let html = CodeHighlighter::with_config(config)
        .highlight_php(&source, 20, 0)
        .unwrap();

    // window is lines 17..=21, all inside the comment
    assert!(html
        .as_str()
        .starts_with("<pre class=\"codeframe\"><div><code><span class=\"codeframe-comment\">"));
    assert!(html.as_str().contains("<span class=\"codeframe-line-highlight\">20:     * line 17</span>"));
    assert!(html.as_str().ends_with("</span></code></div></pre>"));
    assert_balanced(html.as_str());
}

#[test]
fn test_column_marker_on_escaped_text() {
    let html = highlight_php("<?php\n$a = '<b>';\n", 2, 7).unwrap();
    assert!(html.as_str().contains(
        "2:    $a = '<span class=\"codeframe-column-highlight\">&lt;</span>b&gt;';"
    ));
}

#[test]
fn test_fixture_file() {
    let html = CodeHighlighter::new()
        .highlight_file(fixture("bootstrap.php"), 18, 0, None)
        .unwrap();

    assert!(html.contains("<span class=\"codeframe-line-highlight\">18:            $password = *****;</span>"));
    assert!(html.contains("<span class=\"codeframe-line\"> 8:</span>"));
    assert!(html.contains("<span class=\"codeframe-line\">22:</span>"));
    assert!(!html.contains("23:"));
    assert!(!html.contains("hunter2"));
    assert!(html.contains("Welcome &amp; enjoy &lt;b&gt;your&lt;/b&gt; stay"));
    assert_balanced(&html);
}

#[test]
fn test_halt_compiler_payload_is_not_rendered() {
    let source = "<?php\necho 1;\n__halt_compiler();\n\u{0}\u{1}binary 'payload";
    let html = highlight_php(source, 3, 0).unwrap();
    assert!(!html.as_str().contains("payload"));
    assert!(!html.as_str().contains("4:"));
    assert_balanced(html.as_str());
}
