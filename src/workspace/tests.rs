// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

use rstest::{fixture, rstest};

use super::{Workspace, WorkspaceError};
use crate::model::{Point, SheetField, SheetId, SheetKind, SheetName, SheetRow, WindowState};
use crate::overlay::CoordinateMapper;
use crate::scheduler::Scheduler;
use crate::store::MemorySheetSource;

const FAST: Duration = Duration::from_millis(100);
const SLOW: Duration = Duration::from_secs(2);

struct DeskCtx {
    start: Instant,
    desk: Workspace,
}

impl DeskCtx {
    fn named(&mut self, kind: SheetKind, name: &str) -> SheetId {
        let id = self.desk.new_sheet(kind).expect("new sheet");
        self.desk.rename_sheet(id, name).expect("rename");
        id
    }

    fn at(&self, ms: u64) -> Instant {
        self.start + Duration::from_millis(ms)
    }

    fn names_in(&self, zone: SheetId) -> Vec<String> {
        self.desk
            .sheet(zone)
            .and_then(|sheet| sheet.references())
            .map(|refs| refs.names_in_order().iter().map(ToString::to_string).collect())
            .unwrap_or_default()
    }
}

#[fixture]
fn ctx() -> DeskCtx {
    let start = Instant::now();
    DeskCtx { start, desk: Workspace::new(Scheduler::new(FAST, SLOW, start)) }
}

#[rstest]
fn picked_reference_shows_up_in_next_snapshot(mut ctx: DeskCtx) {
    let bob = ctx.named(SheetKind::Character, "Bob");
    let camp = ctx.named(SheetKind::Zone, "Camp");

    assert_eq!(ctx.desk.picker_options(camp), vec![SheetName::new("Bob")]);
    assert!(ctx.desk.add_reference(camp, "Bob"));

    // Rebuilt immediately, without waiting for a tick.
    assert_eq!(ctx.desk.snapshot().targets_of(camp).len(), 1);

    ctx.desk.tick(ctx.at(100));
    let targets = ctx.desk.snapshot().targets_of(camp);
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].sheet, bob);
    assert_eq!(Some(targets[0].anchor), ctx.desk.anchor_of(bob));
}

#[rstest]
fn closed_target_drops_from_snapshot_then_from_zone_on_slow_tick(mut ctx: DeskCtx) {
    let bob = ctx.named(SheetKind::Character, "Bob");
    let camp = ctx.named(SheetKind::Zone, "Camp");
    assert!(ctx.desk.add_reference(camp, "Bob"));

    ctx.desk.close_sheet(bob).expect("close");
    assert!(ctx.desk.snapshot().targets_of(camp).is_empty());
    assert_eq!(ctx.names_in(camp), vec!["Bob"]);

    let ticks = ctx.desk.tick(ctx.at(100));
    assert!(ticks.fast && !ticks.slow);
    assert_eq!(ctx.names_in(camp), vec!["Bob"]);

    let ticks = ctx.desk.tick(ctx.at(2000));
    assert!(ticks.slow);
    assert!(ctx.names_in(camp).is_empty());
}

#[rstest]
fn picker_excludes_self_zones_blanks_and_present_names(mut ctx: DeskCtx) {
    let camp = ctx.named(SheetKind::Zone, "Camp");
    ctx.named(SheetKind::Zone, "Cave");
    ctx.named(SheetKind::Character, "Bob");
    ctx.named(SheetKind::Obstacle, "Wall");
    ctx.named(SheetKind::Character, "Bob");
    ctx.desk.new_sheet(SheetKind::Default).expect("blank");

    assert!(ctx.desk.add_reference(camp, "Wall"));
    assert_eq!(ctx.desk.picker_options(camp), vec![SheetName::new("Bob")]);

    assert!(!ctx.desk.add_reference(camp, "Wall"));
    assert!(!ctx.desk.add_reference(camp, "Cave"));
    assert!(!ctx.desk.add_reference(camp, "Ghost"));
    assert_eq!(ctx.names_in(camp), vec!["Wall"]);
}

#[rstest]
fn add_then_remove_keeps_other_references_in_order(mut ctx: DeskCtx) {
    let camp = ctx.named(SheetKind::Zone, "Camp");
    for name in ["A", "B", "C"] {
        ctx.named(SheetKind::Default, name);
    }
    assert!(ctx.desk.add_reference(camp, "A"));
    assert!(ctx.desk.add_reference(camp, "C"));

    assert!(ctx.desk.add_reference(camp, "B"));
    assert!(ctx.desk.remove_reference(camp, "B"));
    assert!(!ctx.desk.remove_reference(camp, "B"));
    assert_eq!(ctx.names_in(camp), vec!["A", "C"]);
}

#[rstest]
fn rename_carries_zone_links_along(mut ctx: DeskCtx) {
    let bob = ctx.named(SheetKind::Character, "Bob");
    let camp = ctx.named(SheetKind::Zone, "Camp");
    let cave = ctx.named(SheetKind::Zone, "Cave");
    assert!(ctx.desk.add_reference(camp, "Bob"));
    assert!(ctx.desk.add_reference(cave, "Bob"));

    let outcome = ctx.desk.rename_sheet(bob, "Robert").expect("rename");
    assert_eq!(outcome.substituted, 2);
    assert!(!outcome.shadowed);
    assert_eq!(ctx.names_in(camp), vec!["Robert"]);

    ctx.desk.tick(ctx.at(2000));
    assert_eq!(ctx.desk.snapshot().targets_of(cave)[0].sheet, bob);
}

#[rstest]
fn rename_keeps_links_when_old_name_is_still_taken(mut ctx: DeskCtx) {
    let first = ctx.named(SheetKind::Character, "Bob");
    let second = ctx.named(SheetKind::Character, "Bob");
    let camp = ctx.named(SheetKind::Zone, "Camp");
    assert!(ctx.desk.add_reference(camp, "Bob"));
    assert_eq!(ctx.desk.snapshot().targets_of(camp)[0].sheet, first);

    let outcome = ctx.desk.rename_sheet(first, "Other").expect("rename");
    assert_eq!(outcome.substituted, 0);
    assert_eq!(ctx.names_in(camp), vec!["Bob"]);
    assert_eq!(ctx.desk.snapshot().targets_of(camp)[0].sheet, second);

    let outcome = ctx.desk.rename_sheet(first, "Bob").expect("rename back");
    assert!(outcome.shadowed);
    // Earliest-registered sheet wins again.
    assert_eq!(ctx.desk.snapshot().targets_of(camp)[0].sheet, first);
}

#[rstest]
fn minimized_target_is_hidden_but_not_reconciled(mut ctx: DeskCtx) {
    let bob = ctx.named(SheetKind::Character, "Bob");
    let camp = ctx.named(SheetKind::Zone, "Camp");
    assert!(ctx.desk.add_reference(camp, "Bob"));

    assert_eq!(ctx.desk.toggle_minimized(bob), Some(WindowState::Minimized));
    assert!(ctx.desk.snapshot().targets_of(camp).is_empty());
    assert_eq!(ctx.desk.anchor_of(bob), None);

    ctx.desk.tick(ctx.at(2000));
    assert_eq!(ctx.names_in(camp), vec!["Bob"]);

    assert_eq!(ctx.desk.toggle_minimized(bob), Some(WindowState::Normal));
    assert_eq!(ctx.desk.snapshot().targets_of(camp).len(), 1);
}

#[rstest]
fn move_updates_anchor_immediately(mut ctx: DeskCtx) {
    let bob = ctx.named(SheetKind::Character, "Bob");
    let camp = ctx.named(SheetKind::Zone, "Camp");
    assert!(ctx.desk.add_reference(camp, "Bob"));

    let before = ctx.desk.snapshot().targets_of(camp)[0].anchor;
    assert!(ctx.desk.move_sheet(bob, 5, -3));
    assert_eq!(ctx.desk.snapshot().targets_of(camp)[0].anchor, before.offset(5, -3));
}

#[rstest]
fn hit_test_picks_frontmost_visible_sheet(mut ctx: DeskCtx) {
    let back = ctx.desk.new_sheet(SheetKind::Default).expect("back");
    let front = ctx.desk.new_sheet(SheetKind::Default).expect("front");
    let overlap = Point::new(7, 4);
    assert!(ctx.desk.sheet(back).expect("back").rect().contains(overlap));
    assert!(ctx.desk.sheet(front).expect("front").rect().contains(overlap));

    assert_eq!(ctx.desk.hit_test(overlap), Some(front));
    assert!(ctx.desk.raise(back));
    assert_eq!(ctx.desk.hit_test(overlap), Some(back));

    ctx.desk.set_window_state(back, WindowState::Minimized);
    assert_eq!(ctx.desk.hit_test(overlap), Some(front));
    assert_eq!(ctx.desk.hit_test(Point::new(-50, -50)), None);
}

#[rstest]
fn load_opens_referenced_sheets_and_survives_cycles(mut ctx: DeskCtx) {
    let source = MemorySheetSource::new()
        .with("A", "WindowType: ZoneWindow\nName: A\nB\nNotes: \nImagePath: \n")
        .with("B", "WindowType: ZoneWindow\nName: B\nA\nHero\nNotes: \nImagePath: \n")
        .with("Hero", "WindowType: CharacterWindow\nName: Hero\nNotes: \nImagePath: \n");

    let report = ctx.desk.load_from(&source, &[SheetName::new("B"), SheetName::new("Nope")]);
    assert_eq!(report.opened.len(), 3);
    assert_eq!(report.unresolved.len(), 1);
    assert_eq!(ctx.desk.len(), 3);
    assert_eq!(ctx.desk.z_order().len(), 3);

    let a = ctx.desk.registry().find_by_name("A").expect("A").id();
    let b = ctx.desk.registry().find_by_name("B").expect("B").id();
    assert_eq!(ctx.desk.snapshot().targets_of(b).len(), 2);
    assert_eq!(ctx.desk.snapshot().targets_of(a).len(), 1);

    // A second direct load always opens a fresh copy.
    ctx.desk.load_from(&source, &[SheetName::new("B")]);
    assert_eq!(ctx.desk.len(), 4);
}

#[rstest]
fn ensure_open_returns_existing_sheet(mut ctx: DeskCtx) {
    let bob = ctx.named(SheetKind::Character, "Bob");
    let source = MemorySheetSource::new()
        .with("Bob", "WindowType: CharacterWindow\nName: Bob\nNotes: \nImagePath: \n");

    let (id, report) = ctx.desk.ensure_open(&source, &SheetName::new("Bob"));
    assert_eq!(id, Some(bob));
    assert!(report.opened.is_empty());
    assert_eq!(ctx.desk.len(), 1);
}

#[rstest]
fn close_all_empties_the_desk(mut ctx: DeskCtx) {
    ctx.named(SheetKind::Character, "Bob");
    let camp = ctx.named(SheetKind::Zone, "Camp");
    assert!(ctx.desk.add_reference(camp, "Bob"));

    assert_eq!(ctx.desk.close_all(), 2);
    assert!(ctx.desk.is_empty());
    assert!(ctx.desk.z_order().is_empty());
    assert_eq!(ctx.desk.snapshot().zone_count(), 0);
}

#[rstest]
fn folder_operations_need_a_folder(mut ctx: DeskCtx) {
    assert!(matches!(ctx.desk.save_all(), Err(WorkspaceError::NoSheetFolder)));
    assert!(matches!(ctx.desk.restore_layout(), Err(WorkspaceError::NoSheetFolder)));
    assert!(matches!(
        ctx.desk.load_sheets(&[SheetName::new("Bob")]),
        Err(WorkspaceError::NoSheetFolder)
    ));
}

#[rstest]
fn reconcile_all_counts_removed_entries(mut ctx: DeskCtx) {
    let camp = ctx.named(SheetKind::Zone, "Camp");
    let bob = ctx.named(SheetKind::Character, "Bob");
    let wall = ctx.named(SheetKind::Obstacle, "Wall");
    assert!(ctx.desk.add_reference(camp, "Bob"));
    assert!(ctx.desk.add_reference(camp, "Wall"));

    ctx.desk.close_sheet(bob);
    ctx.desk.close_sheet(wall);
    assert_eq!(ctx.desk.reconcile_all(), 2);
    assert_eq!(ctx.desk.reconcile_all(), 0);
}

#[rstest]
fn field_edits_and_rows_go_through_the_desk(mut ctx: DeskCtx) {
    let bob = ctx.named(SheetKind::Character, "Bob");
    let gate = ctx.named(SheetKind::Obstacle, "Gate");

    assert!(ctx.desk.set_field(bob, SheetField::Trouble, "Owes the Guild"));
    assert_eq!(ctx.desk.add_row(bob, SheetRow::Stunt), Some(SheetField::Stunt(0)));
    assert!(ctx.desk.set_field(bob, SheetField::Stunt(0), "Sapper"));
    assert_eq!(ctx.desk.add_row(bob, SheetRow::Obstacle), None);

    let sheet = ctx.desk.sheet(bob).expect("bob");
    assert_eq!(sheet.field_value(SheetField::Trouble), Some("Owes the Guild"));
    assert_eq!(sheet.field_value(SheetField::Stunt(0)), Some("Sapper"));

    assert!(ctx.desk.remove_row(gate, SheetRow::Obstacle, 1));
    assert!(!ctx.desk.remove_row(gate, SheetRow::Obstacle, 1));
    assert!(!ctx.desk.set_field(SheetId::from_raw(999), SheetField::Notes, "x"));
}

#[rstest]
fn editing_notes_keeps_zone_links(mut ctx: DeskCtx) {
    let bob = ctx.named(SheetKind::Character, "Bob");
    let camp = ctx.named(SheetKind::Zone, "Camp");
    assert!(ctx.desk.add_reference(camp, "Bob"));

    assert!(ctx.desk.set_field(camp, SheetField::Notes, "fire pit"));
    assert_eq!(ctx.names_in(camp), vec!["Bob"]);
    assert_eq!(ctx.desk.snapshot().targets_of(camp)[0].sheet, bob);
}
