use beltquote::{
    BeltGeometry, Breakdown, DEFAULT_PATTERN, LayoutOptions, Pattern, PatternError, Quote,
    QuoteRequest, RoundingPolicy, RowKind, RowPlan, classify, classify_text, compute_supplies,
    project,
};
use pretty_assertions::assert_eq;

fn options(with_pushers: bool, with_indentation: bool, rounding: RoundingPolicy) -> LayoutOptions {
    LayoutOptions {
        with_pushers,
        with_indentation,
        rounding,
    }
}

#[test]
fn default_belt_end_to_end() {
    let layout = classify_text(
        DEFAULT_PATTERN,
        BeltGeometry::new(30, 2700),
        options(true, true, RoundingPolicy::Down),
        10,
    )
    .unwrap();
    assert_eq!(layout.total_rows, 90);
    assert_eq!(layout.pusher_row_count, 22);
    assert_eq!(layout.normal_row_count, 68);
    assert_eq!(layout.rows_rendered, 10);

    let supplies = compute_supplies(
        layout.total_rows,
        layout.pusher_row_count,
        layout.tiled_width,
        options(true, true, RoundingPolicy::Down),
        2500,
    );
    assert_eq!(supplies.pins_required, 95);
    assert_eq!(supplies.rods_required, 32);
    assert_eq!(supplies.caps_required, 146);
}

#[test]
fn row_split_always_sums_to_total() {
    let pattern = Pattern::parse("50,100\n100,50\n75,75").unwrap();
    for length in (0..400).step_by(7) {
        for rounding in [RoundingPolicy::Down, RoundingPolicy::Up] {
            let layout = classify(
                &pattern,
                BeltGeometry::new(12, length),
                options(true, false, rounding),
                0,
            );
            assert_eq!(
                layout.pusher_row_count + layout.normal_row_count,
                layout.total_rows
            );
        }
    }
}

#[test]
fn classified_instances_match_row_lengths() {
    let pattern = Pattern::parse("1,2,3,4\n5\n6,7").unwrap();
    for length in [0, 9, 10, 55, 123, 1000] {
        let layout = classify(
            &pattern,
            BeltGeometry::new(10, length),
            options(true, true, RoundingPolicy::Up),
            0,
        );
        let expected: usize = (0..layout.total_rows)
            .map(|r| pattern.row_at(r).len())
            .sum();
        assert_eq!(layout.histograms.module_count(), expected);
    }
}

#[test]
fn classify_is_idempotent() {
    let pattern = Pattern::parse(DEFAULT_PATTERN).unwrap();
    let geometry = BeltGeometry::new(30, 2710);
    let opts = options(true, true, RoundingPolicy::Up);
    assert_eq!(
        classify(&pattern, geometry, opts, 5),
        classify(&pattern, geometry, opts, 5)
    );
}

#[test]
fn rows_to_render_never_changes_counts() {
    let pattern = Pattern::parse(DEFAULT_PATTERN).unwrap();
    let geometry = BeltGeometry::new(30, 2700);
    let opts = options(true, false, RoundingPolicy::Down);
    let all = classify(&pattern, geometry, opts, 0);
    let few = classify(&pattern, geometry, opts, 3);
    assert_eq!(all.histograms, few.histograms);
    assert_eq!(few.rows_rendered, 3);
    assert_eq!(all.rows_rendered, 90);
}

#[test]
fn row_plan_matches_pusher_counts() {
    let pattern = Pattern::parse(DEFAULT_PATTERN).unwrap();
    let layout = classify(
        &pattern,
        BeltGeometry::new(30, 2700),
        options(true, false, RoundingPolicy::Down),
        0,
    );
    let pusher_rows: Vec<usize> = RowPlan::new(&pattern, layout.total_rows, layout.pusher_row_count)
        .filter(|row| row.kind == RowKind::Pusher)
        .map(|row| row.index)
        .collect();
    assert_eq!(pusher_rows.len(), 22);
    assert_eq!(pusher_rows.first(), Some(&0));
    assert_eq!(pusher_rows.last(), Some(&84));
}

#[test]
fn summary_and_lines_agree_with_projection() {
    let request = QuoteRequest {
        length_mm: Some(2700),
        options: options(true, false, RoundingPolicy::Up),
        breakdown: Breakdown::BySide,
        ..QuoteRequest::default()
    };
    let quote = Quote::build(&request).unwrap();
    let consolidated = project(&quote.layout.histograms, Breakdown::Consolidated);
    assert_eq!(quote.report.module_total(), consolidated.module_total());
    assert_eq!(
        quote.report.module_total(),
        quote.layout.histograms.module_count()
    );

    let items = quote.line_items();
    assert!(items.contains(&"50 mm: 23 pcs left".to_string()));
    assert!(items.contains(&"200 mm: 69 pcs center".to_string()));
    assert!(quote.summary_text().contains("50 mm: 23 / 0 / 23 pcs\n"));
}

#[test]
fn malformed_pattern_is_reported() {
    let err = classify_text(
        "50,200\n5O,200",
        BeltGeometry::new(30, 300),
        LayoutOptions::default(),
        0,
    )
    .unwrap_err();
    assert_eq!(
        err,
        PatternError::Malformed {
            line: 2,
            token: "5O".to_string()
        }
    );
}

#[test]
fn quote_serializes_to_json() {
    let request = QuoteRequest {
        length_cm: Some(27.0),
        ..QuoteRequest::default()
    };
    let quote = Quote::build(&request).unwrap();
    let value = serde_json::to_value(&quote).unwrap();
    assert_eq!(value["layout"]["total_rows"], 9);
    assert_eq!(value["supplies"]["pins_required"], 14);
    assert_eq!(value["pattern"][0][0], 50);
    assert_eq!(value["layout"]["histograms"]["normal_left"]["50"], 3);
}
