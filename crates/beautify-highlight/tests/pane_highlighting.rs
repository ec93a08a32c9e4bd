use beautify_core::{Document, EditPipeline, GutterSurface, StyleLayerId, TextSurface};
use beautify_highlight::{
    HighlightEngine, STYLE_COMMENT, STYLE_KEYWORD, STYLE_NUMBER, STYLE_STRING, Span, SpanKind,
    scan,
};
use beautify_lang::LanguageConfig;
use pretty_assertions::assert_eq;

fn gml_pane(text: &str) -> EditPipeline<HighlightEngine> {
    let surface = TextSurface::new(Document::from_text(text));
    match EditPipeline::new(surface, GutterSurface::new(), HighlightEngine::gml()) {
        Ok(pane) => pane,
        Err(never) => match never {},
    }
}

#[test]
fn classifies_declaration_with_trailing_comment() {
    let text = "var x = 5; // comment";
    let spans: Vec<Span> = scan(text, &LanguageConfig::gml()).collect();
    assert_eq!(
        spans,
        vec![
            Span::new(SpanKind::Keyword, 0, 3),
            Span::new(SpanKind::Number, 8, 9),
            Span::new(SpanKind::Comment, 11, 21),
        ]
    );
}

#[test]
fn comment_token_inside_string_still_opens_a_comment() {
    let text = r#"if (a == "b//c") {}"#;
    let spans: Vec<Span> = scan(text, &LanguageConfig::gml()).collect();
    assert_eq!(
        spans,
        vec![
            Span::new(SpanKind::Keyword, 0, 2),
            Span::new(SpanKind::String, 9, 15),
            Span::new(SpanKind::Comment, 11, 19),
        ]
    );

    let pane = gml_pane(text);
    let surface = pane.surface();
    assert_eq!(surface.effective_style_at(0), Some(STYLE_KEYWORD));
    assert_eq!(surface.effective_style_at(10), Some(STYLE_STRING));
    assert_eq!(surface.effective_style_at(11), Some(STYLE_COMMENT));
    assert_eq!(surface.effective_style_at(18), Some(STYLE_COMMENT));
    assert_eq!(surface.effective_style_at(5), None);
}

#[test]
fn scanning_is_deterministic() {
    let lang = LanguageConfig::gml();
    let text = "repeat (3) {\n  with (o) { s = \"x // y\"; } // 12\n}\n\"open";
    let first: Vec<Span> = scan(text, &lang).collect();
    let second: Vec<Span> = scan(text, &lang).collect();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn later_kinds_supersede_earlier_ones() {
    // Keyword and number inside a comment render as comment.
    let pane = gml_pane("x; // var 10");
    let surface = pane.surface();
    assert_eq!(surface.effective_style_at(6), Some(STYLE_COMMENT));
    assert_eq!(surface.effective_style_at(10), Some(STYLE_COMMENT));
    assert_eq!(surface.styles_at(10), vec![STYLE_NUMBER, STYLE_COMMENT]);

    // Number inside a string renders as number (number is applied after string).
    let pane = gml_pane("s = \"a 7\"");
    assert_eq!(pane.surface().effective_style_at(7), Some(STYLE_NUMBER));
    assert_eq!(pane.surface().effective_style_at(5), Some(STYLE_STRING));
}

#[test]
fn edits_clear_stale_tags() {
    let mut pane = gml_pane("var");
    assert_eq!(pane.surface().effective_style_at(0), Some(STYLE_KEYWORD));

    // "variable" is no longer a keyword.
    pane.insert(3, "iable").unwrap();
    assert_eq!(pane.surface().effective_style_at(0), None);
    assert!(pane.surface().style_layer(StyleLayerId::SYNTAX).is_none());

    // Closing an unterminated string tags it.
    pane.replace_all("s = \"abc").unwrap();
    assert_eq!(pane.surface().effective_style_at(5), None);
    pane.insert(8, "\"").unwrap();
    assert_eq!(pane.surface().effective_style_at(5), Some(STYLE_STRING));

    // Splitting the line breaks the literal again.
    pane.insert(6, "\n").unwrap();
    assert_eq!(pane.surface().effective_style_at(5), None);
    assert_eq!(pane.gutter().model().len(), 2);
}

#[test]
fn styled_runs_for_rendering() {
    let pane = gml_pane("if 1 // c");
    let runs: Vec<_> = pane
        .surface()
        .styled_runs(0)
        .into_iter()
        .map(|run| (run.columns, run.style))
        .collect();
    assert_eq!(
        runs,
        vec![
            (0..2, Some(STYLE_KEYWORD)),
            (2..3, None),
            (3..4, Some(STYLE_NUMBER)),
            (4..5, None),
            (5..9, Some(STYLE_COMMENT)),
        ]
    );
}
