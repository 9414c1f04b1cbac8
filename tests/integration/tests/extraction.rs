//! End-to-end extraction tests
//!
//! Runs full documents (source plus rendered HTML) through the extractor and
//! checks scopes and recovered lines.

use rstest::rstest;
use scopelint_core::{
    BlockCollector, BlockKind, Document, ExtractConfig, ScopeTables, extract_blocks,
};
use tracing_subscriber::EnvFilter;

const REPEATED_MD: &str = include_str!("fixtures/repeated_headings.md");
const REPEATED_HTML: &str = include_str!("fixtures/repeated_headings.html");

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn extract(source: &str, ext: &str, html: &str) -> BlockCollector {
    init_tracing();
    extract_blocks(&Document::new(source, ext), html, &ScopeTables::default())
}

mod position_recovery {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn repeated_heading_reports_its_own_line() {
        let blocks = extract(REPEATED_MD, ".md", REPEATED_HTML);

        let headings: Vec<_> = blocks
            .with_scope("text.heading.h2.md")
            .map(|b| (b.text.as_str(), b.line))
            .collect();

        assert_eq!(headings, vec![("Setup", Some(3)), ("Setup", Some(40))]);
    }

    #[test]
    fn paragraphs_follow_source_lines() {
        let blocks = extract(REPEATED_MD, ".md", REPEATED_HTML);

        let lines: Vec<_> = blocks
            .with_scope("txt.md")
            .filter_map(|b| b.line)
            .collect();

        let mut expected: Vec<usize> = (0..17).map(|n| 5 + 2 * n).collect();
        expected.push(42);
        assert_eq!(lines, expected);
    }

    #[test]
    fn table_of_contents_does_not_steal_heading_lines() {
        let source = "# Guide\n\n- [Setup](#setup)\n- [Usage](#usage)\n\n## Setup\n\nInstall it.\n\n## Usage\n\nUse it.\n";
        let html = concat!(
            "<h1>Guide</h1>\n",
            "<ul>\n",
            "<li><a href=\"#setup\">Setup</a></li>\n",
            "<li><a href=\"#usage\">Usage</a></li>\n",
            "</ul>\n",
            "<h2 id=\"setup\">Setup</h2>\n",
            "<p>Install it.</p>\n",
            "<h2 id=\"usage\">Usage</h2>\n",
            "<p>Use it.</p>\n",
        );
        let blocks = extract(source, ".md", html);

        let list: Vec<_> = blocks
            .with_scope("text.list.md")
            .map(|b| (b.text.as_str(), b.line))
            .collect();
        let headings: Vec<_> = blocks
            .with_scope("text.heading.h2.md")
            .map(|b| (b.text.as_str(), b.line))
            .collect();

        assert_eq!(list, vec![("Setup", Some(3)), ("Usage", Some(4))]);
        assert_eq!(headings, vec![("Setup", Some(6)), ("Usage", Some(10))]);
    }

    #[test]
    fn embedded_document_offsets_lines() {
        init_tracing();
        let doc = Document::new("Intro.\n\nBody.\n", ".md").with_line_offset(100);
        let blocks = extract_blocks(
            &doc,
            "<p>Intro.</p><p>Body.</p>",
            &ScopeTables::default(),
        );

        let lines: Vec<_> = blocks.with_scope("txt.md").map(|b| b.line).collect();
        assert_eq!(lines, vec![Some(101), Some(103)]);
    }
}

mod scopes {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    #[case::markdown(".md", "text.blockquote.md")]
    #[case::rst(".rst", "text.blockquote.rst")]
    #[case::asciidoc(".adoc", "text.blockquote.adoc")]
    #[case::real_extension_kept(".markdown", "text.blockquote.markdown")]
    fn scope_suffix_uses_document_extension(#[case] ext: &str, #[case] scope: &str) {
        let blocks = extract(
            "> Quoted words.\n",
            ext,
            "<blockquote>\n<p>Quoted words.</p>\n</blockquote>\n",
        );

        assert_eq!(blocks.first(scope).map(|b| b.text.as_str()), Some("Quoted words."));
    }

    #[test]
    fn inline_scopes_are_linted_twice() {
        let blocks = extract(
            "See [the docs](x) for more.\n",
            ".md",
            r#"<p>See <a href="x">the docs</a> for more.</p>"#,
        );

        let hits: Vec<_> = blocks
            .blocks
            .iter()
            .filter(|b| b.line.is_some() && b.text.contains("the docs"))
            .map(|b| (b.scope.as_str(), b.kind))
            .collect();

        assert_eq!(
            hits,
            vec![("link", BlockKind::Text), ("txt.md", BlockKind::Prose)]
        );
    }

    #[test]
    fn strong_and_emphasis_inside_list_item() {
        let blocks = extract(
            "- a **bold** and *soft* item\n",
            ".md",
            "<ul>\n<li>a <strong>bold</strong> and <em>soft</em> item</li>\n</ul>\n",
        );

        assert_eq!(blocks.first("strong").unwrap().text, "bold");
        assert_eq!(blocks.first("emphasis").unwrap().text, "soft");
        assert_eq!(
            blocks.first("text.list.md").unwrap().text,
            "a bold and soft item"
        );
    }

    #[test]
    fn image_alt_text_has_its_own_scope() {
        let blocks = extract(
            "Intro.\n\n![Architecture overview](arch.svg)\n",
            ".md",
            "<p>Intro.</p>\n<p><img src=\"arch.svg\" alt=\"Architecture overview\"></p>\n",
        );

        let alt = blocks.first("text.attr.alt").unwrap();
        assert_eq!(alt.text, "Architecture overview");
        assert_eq!(alt.line, Some(3));
    }
}

mod masking {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn inline_code_is_masked_with_backticks() {
        let blocks = extract(
            "Never run `rm -rf /` here.\n",
            ".md",
            "<p>Never run <code>rm -rf /</code> here.</p>",
        );

        assert_eq!(
            blocks.first("txt.md").unwrap().text,
            "Never run `********` here."
        );
        assert!(!blocks.first("summary.md").unwrap().text.contains("rm -rf"));
    }

    #[test]
    fn configured_classes_are_masked() {
        init_tracing();
        let config = ExtractConfig::from_json(r#"{ "ignoredClasses": ["secret"] }"#).unwrap();
        let tables = ScopeTables::from_config(&config);
        let blocks = extract_blocks(
            &Document::new("The key is hunter2.\n", ".md"),
            r#"<p>The key is <span class="secret">hunter2</span>.</p>"#,
            &tables,
        );

        assert_eq!(
            blocks.first("txt.md").unwrap().text,
            "The key is `*******`."
        );
    }

    #[test]
    fn configured_content_tags_replace_defaults() {
        init_tracing();
        let config = ExtractConfig::from_json(r#"{ "ignoredScopes": ["kbd"] }"#).unwrap();
        let tables = ScopeTables::from_config(&config);
        let blocks = extract_blocks(
            &Document::new("Press Ctrl and `x`.\n", ".md"),
            "<p>Press <kbd>Ctrl</kbd> and <code>x</code>.</p>",
            &tables,
        );

        assert_eq!(
            blocks.first("txt.md").unwrap().text,
            "Press `****` and x."
        );
    }
}

mod document_blocks {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn summary_contains_only_prose() {
        let blocks = extract(REPEATED_MD, ".md", REPEATED_HTML);

        let summaries: Vec<_> = blocks.with_scope("summary.md").collect();
        assert_eq!(summaries.len(), 1);

        let summary = &summaries[0].text;
        assert!(summary.starts_with("Step 1 describes option 1 of the configuration. Step 2"));
        assert!(!summary.contains("Setup"));
        assert!(!summary.contains("Project guide"));
    }

    #[test]
    fn raw_block_is_last() {
        let blocks = extract(REPEATED_MD, ".md", REPEATED_HTML);

        let last = blocks.blocks.last().unwrap();
        assert_eq!(last.scope, "raw.md");
        assert_eq!(last.text, REPEATED_MD);
        assert_eq!(last.line, None);
    }

    #[test]
    fn malformed_markup_still_produces_blocks() {
        let blocks = extract(
            "Broken <b>markup\n\nstill works.\n",
            ".md",
            "<p>Broken <b>markup</p>\n<p>still works.</p\n",
        );

        assert!(blocks.blocks.iter().any(|b| b.text.contains("markup")));
        assert_eq!(blocks.blocks.last().unwrap().scope, "raw.md");
    }
}

mod concurrency {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::thread;

    #[test]
    fn tables_are_shared_between_passes() {
        init_tracing();
        let tables = ScopeTables::default();

        let results: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let tables = &tables;
                    s.spawn(move || {
                        let source = format!("Paragraph {}.\n", i);
                        let html = format!("<p>Paragraph {}.</p>", i);
                        let blocks = extract_blocks(&Document::new(&source, ".md"), &html, tables);
                        blocks.first("txt.md").map(|b| b.text.clone())
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let expected: Vec<_> = (0..4).map(|i| Some(format!("Paragraph {}.", i))).collect();
        assert_eq!(results, expected);
    }
}
