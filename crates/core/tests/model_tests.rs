use fortune_chart_core::models::geometry::{column_at, LineSegment, Point, Rect};
use fortune_chart_core::models::record::{PeriodRecord, Trend};
use fortune_chart_core::models::scene::{CandleColor, HoverState, Layer, MovingAverageKind};
use fortune_chart_core::models::series::{ChartInput, PivotSet, Series};
use fortune_chart_core::models::settings::{ChartSettings, Palette};

fn rec(age: u32, open: f64, close: f64, high: f64, low: f64) -> PeriodRecord {
    PeriodRecord::new(age, 2000 + age as i32, open, close, high, low, "平稳")
}

// ═══════════════════════════════════════════════════════════════════
//  Trend
// ═══════════════════════════════════════════════════════════════════

mod trend {
    use super::*;

    #[test]
    fn classifies_up_down_flat() {
        assert_eq!(Trend::from_open_close(50.0, 60.0), Trend::Bull);
        assert_eq!(Trend::from_open_close(60.0, 50.0), Trend::Bear);
        assert_eq!(Trend::from_open_close(55.0, 55.0), Trend::Doji);
    }

    #[test]
    fn display_lowercase() {
        assert_eq!(Trend::Bull.to_string(), "bull");
        assert_eq!(Trend::Bear.to_string(), "bear");
        assert_eq!(Trend::Doji.to_string(), "doji");
    }

    #[test]
    fn serde_uses_lowercase_strings() {
        assert_eq!(serde_json::to_string(&Trend::Doji).unwrap(), "\"doji\"");
        let t: Trend = serde_json::from_str("\"bear\"").unwrap();
        assert_eq!(t, Trend::Bear);
    }

    #[test]
    fn rejects_unknown_trend() {
        assert!(serde_json::from_str::<Trend>("\"sideways\"").is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  PeriodRecord
// ═══════════════════════════════════════════════════════════════════

mod period_record {
    use super::*;

    #[test]
    fn new_derives_trend_and_seeds_averages() {
        let r = rec(3, 40.0, 45.0, 50.0, 38.0);
        assert_eq!(r.trend, Trend::Bull);
        assert_eq!(r.ma5, 45.0);
        assert_eq!(r.ma10, 45.0);
        assert_eq!(r.year, 2003);
        assert_eq!(r.summary, "平稳");
    }

    #[test]
    fn doji_counts_as_up() {
        let r = rec(0, 50.0, 50.0, 55.0, 45.0);
        assert!(r.is_up());
        assert_eq!(r.color(), CandleColor::Bull);
        // The producer-side trend still says doji.
        assert_eq!(r.trend, Trend::Doji);
    }

    #[test]
    fn down_period_is_bear() {
        let r = rec(0, 60.0, 55.0, 62.0, 50.0);
        assert!(!r.is_up());
        assert_eq!(r.color(), CandleColor::Bear);
    }

    #[test]
    fn color_ignores_inconsistent_trend() {
        let mut r = rec(0, 50.0, 60.0, 65.0, 48.0);
        r.trend = Trend::Bear;
        assert_eq!(r.color(), CandleColor::Bull);
    }

    #[test]
    fn range_is_high_minus_low() {
        assert_eq!(rec(0, 50.0, 60.0, 65.0, 48.0).range(), 17.0);
    }

    #[test]
    fn deserializes_producer_json() {
        let json = r#"{"age":0,"year":2000,"open":50,"close":60,"high":65,"low":48,
                       "ma5":60,"ma10":60,"summary":"起步","trend":"bull"}"#;
        let r: PeriodRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.age, 0);
        assert_eq!(r.close, 60.0);
        assert_eq!(r.summary, "起步");
        assert_eq!(r.trend, Trend::Bull);
    }

    #[test]
    fn missing_summary_defaults_to_empty() {
        let json = r#"{"age":1,"year":2001,"open":50,"close":40,"high":55,"low":35,
                       "ma5":45,"ma10":45,"trend":"bear"}"#;
        let r: PeriodRecord = serde_json::from_str(json).unwrap();
        assert!(r.summary.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Series / PivotSet / ChartInput
// ═══════════════════════════════════════════════════════════════════

mod series {
    use super::*;

    fn three() -> Series {
        Series::new(vec![
            rec(0, 50.0, 52.0, 55.0, 48.0),
            rec(1, 52.0, 49.0, 53.0, 47.0),
            rec(5, 49.0, 58.0, 60.0, 45.0),
        ])
    }

    #[test]
    fn index_of_age_exact_match_only() {
        let s = three();
        assert_eq!(s.index_of_age(0), Some(0));
        assert_eq!(s.index_of_age(5), Some(2));
        assert_eq!(s.index_of_age(3), None);
        assert_eq!(s.index_of_age(200), None);
    }

    #[test]
    fn negative_age_is_not_found() {
        assert_eq!(three().index_of_age(-1), None);
    }

    #[test]
    fn closes_in_order() {
        assert_eq!(three().closes(), vec![52.0, 49.0, 58.0]);
    }

    #[test]
    fn age_span() {
        assert_eq!(three().age_span(), Some((0, 5)));
        assert_eq!(Series::default().age_span(), None);
    }

    #[test]
    fn empty_series() {
        let s = Series::default();
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
        assert!(s.get(0).is_none());
    }

    #[test]
    fn serializes_as_plain_array() {
        let json = serde_json::to_string(&three()).unwrap();
        assert!(json.starts_with('['));
        let back: Series = serde_json::from_str(&json).unwrap();
        assert_eq!(back, three());
    }

    #[test]
    fn iterates_by_reference() {
        let s = three();
        let ages: Vec<u32> = (&s).into_iter().map(|r| r.age).collect();
        assert_eq!(ages, vec![0, 1, 5]);
    }

    #[test]
    fn pivot_set_camel_case_with_defaults() {
        let p: PivotSet = serde_json::from_str(r#"{"bullYears":[10,45]}"#).unwrap();
        assert_eq!(p.bull_years, vec![10, 45]);
        assert!(p.bear_years.is_empty());
        assert!(!p.is_empty());
        assert!(PivotSet::default().is_empty());
    }

    #[test]
    fn chart_input_ignores_unrelated_keys() {
        let json = r##"{
            "bazi": {"yearPillar": "甲辰"},
            "analysis": "# 总评",
            "chartData": [
                {"age":0,"year":2000,"open":50,"close":60,"high":65,"low":48,
                 "ma5":60,"ma10":60,"summary":"起步","trend":"bull"}
            ],
            "bullYears": [0],
            "bearYears": []
        }"##;
        let input: ChartInput = serde_json::from_str(json).unwrap();
        let (series, pivots) = input.into_parts();
        assert_eq!(series.len(), 1);
        assert_eq!(pivots.bull_years, vec![0]);
        assert!(pivots.bear_years.is_empty());
    }

    #[test]
    fn chart_input_requires_chart_data() {
        assert!(serde_json::from_str::<ChartInput>(r#"{"bullYears":[1]}"#).is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Geometry
// ═══════════════════════════════════════════════════════════════════

mod geometry {
    use super::*;

    #[test]
    fn rect_edges_and_center() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center_x(), 25.0);
        assert_eq!(r.center_y(), 40.0);
    }

    #[test]
    fn rect_contains_is_inclusive() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(!r.contains(Point::new(10.1, 5.0)));
        assert!(!r.contains(Point::new(5.0, -0.1)));
    }

    #[test]
    fn segment_length() {
        let l = LineSegment::new(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert_eq!(l.length(), 5.0);
    }

    #[test]
    fn dashes_alternate_and_cut_last_piece() {
        let l = LineSegment::new(Point::new(0.0, 10.0), Point::new(20.0, 10.0));
        let pieces = l.dashes(3.0, 3.0);
        let spans: Vec<(f64, f64)> = pieces.iter().map(|p| (p.from.x, p.to.x)).collect();
        assert_eq!(spans, vec![(0.0, 3.0), (6.0, 9.0), (12.0, 15.0), (18.0, 20.0)]);
        assert!(pieces.iter().all(|p| p.from.y == 10.0 && p.to.y == 10.0));
    }

    #[test]
    fn dashes_follow_vertical_direction() {
        let l = LineSegment::new(Point::new(5.0, 0.0), Point::new(5.0, 9.0));
        let pieces = l.dashes(3.0, 3.0);
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[1].from, Point::new(5.0, 6.0));
        assert_eq!(pieces[1].to, Point::new(5.0, 9.0));
    }

    #[test]
    fn degenerate_segment_is_one_dash() {
        let l = LineSegment::new(Point::new(1.0, 1.0), Point::new(1.0, 1.0));
        assert_eq!(l.dashes(3.0, 3.0), vec![l]);
    }

    #[test]
    fn column_at_divides_evenly() {
        let plot = Rect::new(20.0, 20.0, 100.0, 100.0);
        assert_eq!(column_at(plot, 25.0, 4, Point::new(20.0, 50.0)), Some(0));
        assert_eq!(column_at(plot, 25.0, 4, Point::new(44.9, 50.0)), Some(0));
        assert_eq!(column_at(plot, 25.0, 4, Point::new(45.0, 50.0)), Some(1));
        assert_eq!(column_at(plot, 25.0, 4, Point::new(120.0, 50.0)), Some(3));
    }

    #[test]
    fn column_at_outside_plot_or_empty() {
        let plot = Rect::new(20.0, 20.0, 100.0, 100.0);
        assert_eq!(column_at(plot, 25.0, 4, Point::new(5.0, 50.0)), None);
        assert_eq!(column_at(plot, 25.0, 4, Point::new(50.0, 130.0)), None);
        assert_eq!(column_at(plot, 0.0, 0, Point::new(50.0, 50.0)), None);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Scene enums
// ═══════════════════════════════════════════════════════════════════

mod scene_types {
    use super::*;

    #[test]
    fn candle_color_rule() {
        assert_eq!(CandleColor::from_open_close(50.0, 50.0), CandleColor::Bull);
        assert_eq!(CandleColor::from_open_close(50.0, 50.1), CandleColor::Bull);
        assert_eq!(CandleColor::from_open_close(50.0, 49.9), CandleColor::Bear);
    }

    #[test]
    fn candle_color_resolves_palette() {
        let p = Palette::default();
        assert_eq!(CandleColor::Bull.resolve(&p), "#ef4444");
        assert_eq!(CandleColor::Bear.resolve(&p), "#10b981");
    }

    #[test]
    fn moving_average_kind_windows() {
        assert_eq!(MovingAverageKind::Ma5.window(), 5);
        assert_eq!(MovingAverageKind::Ma10.window(), 10);
        assert_eq!(MovingAverageKind::Ma10.to_string(), "MA10");
    }

    #[test]
    fn moving_average_kind_reads_record() {
        let mut r = rec(0, 50.0, 60.0, 65.0, 48.0);
        r.ma5 = 57.5;
        r.ma10 = 55.0;
        assert_eq!(MovingAverageKind::Ma5.value_of(&r), 57.5);
        assert_eq!(MovingAverageKind::Ma10.value_of(&r), 55.0);
    }

    #[test]
    fn hover_state_defaults_to_idle() {
        assert_eq!(HoverState::default(), HoverState::Idle);
        assert_eq!(HoverState::Idle.index(), None);
        assert_eq!(HoverState::Hovering(4).index(), Some(4));
    }

    #[test]
    fn hover_state_serde_is_tagged() {
        let json = serde_json::to_string(&HoverState::Hovering(2)).unwrap();
        assert_eq!(json, r#"{"state":"hovering","index":2}"#);
        let back: HoverState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, HoverState::Hovering(2));
    }

    #[test]
    fn draw_order_back_to_front() {
        assert_eq!(
            Layer::DRAW_ORDER,
            [
                Layer::Grid,
                Layer::Ma5,
                Layer::Ma10,
                Layer::Candles,
                Layer::Pivots,
                Layer::Tooltip
            ]
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
//  ChartSettings
// ═══════════════════════════════════════════════════════════════════

mod chart_settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = ChartSettings::default();
        assert_eq!(s.width, 800.0);
        assert_eq!(s.height, 500.0);
        assert_eq!(s.candle.min_body_height, 2.0);
        assert_eq!(s.candle.body_padding, 2.0);
        assert_eq!(s.value_ticks, 5);
        assert!(!s.recompute_moving_averages);
        assert_eq!(s.bull_glyph, "★");
        assert_eq!(s.bear_glyph, "⚠");
    }

    #[test]
    fn plot_area_subtracts_margins() {
        let plot = ChartSettings::default().plot_area();
        assert_eq!(plot, Rect::new(40.0, 40.0, 730.0, 440.0));
    }

    #[test]
    fn plot_area_never_negative() {
        let s = ChartSettings {
            width: 10.0,
            height: 10.0,
            ..ChartSettings::default()
        };
        let plot = s.plot_area();
        assert_eq!(plot.width, 0.0);
        assert_eq!(plot.height, 0.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let s = ChartSettings::from_json(r#"{"width": 1200, "recompute_moving_averages": true}"#)
            .unwrap();
        assert_eq!(s.width, 1200.0);
        assert!(s.recompute_moving_averages);
        assert_eq!(s.height, 500.0);
        assert_eq!(s.colors, Palette::default());
    }

    #[test]
    fn partial_nested_json_keeps_sibling_defaults() {
        let s = ChartSettings::from_json(
            r##"{"margin": {"top": 10}, "colors": {"bull": "#ff0000"}, "candle": {"min_body_height": 4}}"##,
        )
        .unwrap();

        assert_eq!(s.margin.top, 10.0);
        assert_eq!(s.margin.right, 30.0);
        assert_eq!(s.margin.bottom, 20.0);
        assert_eq!(s.margin.left, 40.0);

        assert_eq!(s.colors.bull, "#ff0000");
        assert_eq!(s.colors.bear, "#10b981");
        assert_eq!(s.colors.ma10, "#3b82f6");

        assert_eq!(s.candle.min_body_height, 4.0);
        assert_eq!(s.candle.body_padding, 2.0);
        assert_eq!(s.candle.wick_width, 1.5);
    }

    #[test]
    fn json_roundtrip() {
        let s = ChartSettings::default();
        let back = ChartSettings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(ChartSettings::from_json("{not json").is_err());
    }
}
