/**
 * Each parser writes several CSV files whose names embed a fixed identifier. The identifier
 * tells us which column holds the authoritative last write timestamp for that file
 *
 * Lookup order matters: `AppCompatCache` first, then the `Amcache` families in table order.
 * The first identifier contained in the filename wins
 */
#[derive(Debug, PartialEq)]
pub(crate) struct SchemaFamily {
    pub(crate) identifier: &'static str,
    pub(crate) timestamp_column: &'static str,
}

#[derive(Debug, PartialEq)]
pub(crate) enum FamilyMatch {
    Family(&'static SchemaFamily),
    Unmatched,
}

pub(crate) static APPCOMPATCACHE_FAMILIES: [SchemaFamily; 1] = [SchemaFamily {
    identifier: "AppCompatCache",
    timestamp_column: "LastModifiedTimeUTC",
}];

pub(crate) static AMCACHE_FAMILIES: [SchemaFamily; 8] = [
    SchemaFamily {
        identifier: "Amcache_AssociatedFileEntries",
        timestamp_column: "FileKeyLastWriteTimestamp",
    },
    SchemaFamily {
        identifier: "Amcache_DeviceContainers",
        timestamp_column: "KeyLastWriteTimestamp",
    },
    SchemaFamily {
        identifier: "Amcache_DevicePnps",
        timestamp_column: "KeyLastWriteTimestamp",
    },
    SchemaFamily {
        identifier: "Amcache_DriveBinaries",
        timestamp_column: "KeyLastWriteTimestamp",
    },
    SchemaFamily {
        identifier: "Amcache_DriverPackages",
        timestamp_column: "KeyLastWriteTimestamp",
    },
    SchemaFamily {
        identifier: "Amcache_ShortCuts",
        timestamp_column: "KeyLastWriteTimestamp",
    },
    SchemaFamily {
        identifier: "Amcache_UnassociatedFileEntries",
        timestamp_column: "FileKeyLastWriteTimestamp",
    },
    SchemaFamily {
        identifier: "Amcache_ProgramEntries",
        timestamp_column: "KeyLastWriteTimestamp",
    },
];

/// Find the schema family for a CSV filename. Matching is case-sensitive substring containment
pub(crate) fn match_family(filename: &str) -> FamilyMatch {
    let families = APPCOMPATCACHE_FAMILIES.iter().chain(AMCACHE_FAMILIES.iter());
    for family in families {
        if filename.contains(family.identifier) {
            return FamilyMatch::Family(family);
        }
    }
    FamilyMatch::Unmatched
}
