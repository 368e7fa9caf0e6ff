use std::collections::HashSet;

use geoscope::color::{color_of, global_colors, set_global_colors, MapColors, PaintContext};
use geoscope::RegionId;

fn set(ids: &[RegionId]) -> HashSet<RegionId> {
    ids.iter().copied().collect()
}

fn ctx<'a>(
    filtered: &'a HashSet<RegionId>,
    emphasis: bool,
    sel1: &'a HashSet<RegionId>,
    sel2: &'a HashSet<RegionId>,
    colors: &'a MapColors,
) -> PaintContext<'a> {
    PaintContext {
        filtered,
        filter_emphasis: emphasis,
        selection1: sel1,
        selection2: sel2,
        colors,
    }
}

#[test]
fn membership_precedence() {
    let colors = MapColors::classic();
    let filtered = set(&[]);
    let sel1 = set(&[1, 3]);
    let sel2 = set(&[2, 3]);
    let c = ctx(&filtered, false, &sel1, &sel2, &colors);

    assert_eq!(color_of(0, &c), colors.unselected);
    assert_eq!(color_of(1, &c), colors.selection1);
    assert_eq!(color_of(2, &c), colors.selection2);
    assert_eq!(color_of(3, &c), colors.overlap, "both selections -> overlap");
}

#[test]
fn filter_emphasis_beats_every_selection_state() {
    let colors = MapColors::classic();
    let filtered = set(&[3]);
    let sel1 = set(&[3]);
    let sel2 = set(&[3]);
    let c = ctx(&filtered, true, &sel1, &sel2, &colors);

    // Region 3 is in both selections AND the filtered set: filtered wins.
    assert_eq!(color_of(3, &c), colors.filtered);
}

#[test]
fn filter_membership_is_inert_without_emphasis() {
    let colors = MapColors::classic();
    let filtered = set(&[0, 1]);
    let sel1 = set(&[1]);
    let sel2 = set(&[]);
    let c = ctx(&filtered, false, &sel1, &sel2, &colors);

    assert_eq!(color_of(0, &c), colors.unselected);
    assert_eq!(color_of(1, &c), colors.selection1);
}

#[test]
fn unfiltered_regions_keep_selection_colors_under_emphasis() {
    let colors = MapColors::classic();
    let filtered = set(&[0]);
    let sel1 = set(&[1]);
    let sel2 = set(&[]);
    let c = ctx(&filtered, true, &sel1, &sel2, &colors);

    assert_eq!(color_of(1, &c), colors.selection1);
}

#[test]
fn global_palette_round_trip() {
    let original = global_colors();
    set_global_colors(MapColors::dark());
    assert_eq!(global_colors(), MapColors::dark());
    set_global_colors(original.clone());
    assert_eq!(global_colors(), original);
}
