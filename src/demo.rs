// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Built-in demo desk.
//!
//! Two zones that reference each other plus a handful of characters and obstacles, served from
//! memory so `--demo` works without a sheet folder.

use crate::model::SheetName;
use crate::store::MemorySheetSource;
use crate::workspace::Workspace;

const CAMP: &str = "\
WindowType: ZoneWindow
Name: Camp
Bob
Wall
Cave
Notes: A cold night by the river.\\nThe fire is low.
ImagePath:
";

const CAVE: &str = "\
WindowType: ZoneWindow
Name: Cave
Camp
Troll
Notes: Something breathes in the dark.
ImagePath:
";

const BOB: &str = "\
WindowType: CharacterWindow
Name: Bob
Fate Points: 3
Refresh: 3
Careful: 1
Clever: 2
Flashy: 0
Forceful: 3
Quick: 2
Sneaky: 1
High Concept: Retired Siege Engineer
Trouble: Owes the Thieves' Guild
Aspect: Knows every wall has a weak spot
Stunt: Because I build things, +2 to Overcome with Clever when breaching
Notes:
ImagePath:
";

const TROLL: &str = "\
WindowType: CharacterWindow
Name: Troll
Fate Points: 0
Refresh: 0
Careful: 0
Clever: 0
Flashy: 1
Forceful: 4
Quick: 1
Sneaky: 2
High Concept: Hungry Cave Troll
Trouble: Afraid of Fire
Notes:
ImagePath:
";

const WALL: &str = "\
WindowType: ObstacleWindow
Name: Wall
Obstacle:3
Guards:2
Notes:
ImagePath:
";

/// Sheets the demo desk opens first; everything else arrives through zone references.
pub const DEMO_ENTRY: &str = "Camp";

pub fn demo_source() -> MemorySheetSource {
    MemorySheetSource::new()
        .with("Camp", CAMP)
        .with("Cave", CAVE)
        .with("Bob", BOB)
        .with("Troll", TROLL)
        .with("Wall", WALL)
}

/// Opens the demo sheets on `desk`. Returns how many sheets were opened.
pub fn populate_demo(desk: &mut Workspace) -> usize {
    let source = demo_source();
    let (_, report) = desk.ensure_open(&source, &SheetName::from(DEMO_ENTRY));
    report.opened.len()
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::{demo_source, populate_demo};
    use crate::model::{SheetKind, SheetName};
    use crate::scheduler::Scheduler;
    use crate::store::SheetSource;
    use crate::workspace::Workspace;

    #[test]
    fn demo_records_parse() {
        let source = demo_source();
        for name in ["Camp", "Cave", "Bob", "Troll", "Wall"] {
            let record = source.read_record(&SheetName::from(name)).expect("record");
            assert_eq!(record.name.as_str(), name);
        }
        assert_eq!(source.read_kind(&SheetName::from("Wall")).expect("kind"), SheetKind::Obstacle);
    }

    #[test]
    fn demo_desk_opens_everything_through_zone_links() {
        let mut desk = Workspace::new(Scheduler::with_defaults(Instant::now()));
        assert_eq!(populate_demo(&mut desk), 5);
        assert_eq!(desk.len(), 5);
        assert_eq!(desk.snapshot().zone_count(), 2);
        assert_eq!(desk.snapshot().link_count(), 5);
        assert!(desk.snapshot().dangling().is_empty());
    }
}
