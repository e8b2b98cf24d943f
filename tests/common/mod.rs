#![allow(dead_code)]

use assert_fs::TempDir;
use assert_fs::prelude::*;
use std::path::PathBuf;

/// A small but complete export: a trunk import, a branch copied from it,
/// a tag cut from the branch, and one insignificant edit in between.
pub const SAMPLE_EXPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<log>
<logentry revision="5">
<author>alice</author>
<date>2011-11-02T13:05:32.123456Z</date>
<paths>
<path kind="dir" action="A">/project/trunk</path>
</paths>
<msg>initial import</msg>
</logentry>
<logentry revision="8">
<author>alice</author>
<date>2011-11-02T15:40:11.000000Z</date>
<paths>
<path kind="file" action="M">/project/trunk/src/main.c</path>
</paths>
<msg>fix a warning</msg>
</logentry>
<logentry revision="10">
<author>bob</author>
<date>2011-11-03T09:00:00.000000Z</date>
<paths>
<path kind="dir" action="A" copyfrom-path="/project/trunk" copyfrom-rev="5">/project/branches/feature</path>
</paths>
<msg>create the feature branch</msg>
</logentry>
<logentry revision="12">
<author>bob</author>
<date>2011-11-04T18:30:00.000000Z</date>
<paths>
<path kind="dir" action="A" copyfrom-path="/project/branches/feature" copyfrom-rev="10">/project/tags/1.0.0</path>
</paths>
<msg>tag the first release</msg>
</logentry>
</log>
"#;

/// An export whose second copy points at a path outside the
/// trunk/branches/tags convention.
pub const EXPORT_WITH_UNRESOLVABLE_SOURCE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<log>
<logentry revision="5">
<author>alice</author>
<date>2011-11-02T13:05:32.000000Z</date>
<paths>
<path kind="dir" action="A">/project/trunk</path>
</paths>
<msg>initial import</msg>
</logentry>
<logentry revision="10">
<author>bob</author>
<date>2011-11-03T09:00:00.000000Z</date>
<paths>
<path kind="dir" action="A" copyfrom-path="/misc/scratch" copyfrom-rev="5">/project/branches/odd</path>
<path kind="dir" action="A" copyfrom-path="/project/trunk" copyfrom-rev="5">/project/branches/fine</path>
</paths>
<msg>two copies, one from outside the layout</msg>
</logentry>
</log>
"#;

/// A structurally broken export: the revision has no date.
pub const MALFORMED_EXPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<log>
<logentry revision="5">
<author>alice</author>
<paths>
<path kind="dir" action="A">/project/trunk</path>
</paths>
</logentry>
</log>
"#;

pub fn write_export(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let file = dir.child(name);
    file.write_str(content).expect("failed to write the export fixture");
    file.path().to_path_buf()
}
