//! Testing utilities and curated sample sources
//!
//!     Operational visit files are access-restricted, so tests run against a
//!     small curated corpus that mirrors their documented shape. Getting the
//!     statement syntax subtly wrong in an ad-hoc test string produces a
//!     parser tuned to the wrong thing, so tests should take their sources
//!     from [samples] instead of embedding visit-file text inline; when the
//!     format understanding changes, the corpus is the one place to update.

/// Curated visit-file sources used across the test suites.
pub mod samples {
    /// A NIRISS calibration visit: one group, one sequence, one
    /// configuration change and two exposures.
    pub const NIRISS_FLAT: &str = "\
# NIRISS External Calibration
VISIT ,V00783001001 ,APERTURE=NIS_CEN;
GROUP ,1;
SEQ ,1;
AUX ,CONFIG=NIRISS Internal Flat;
ACT ,01 ,NISMAIN ,NINTS=2 ,NGROUPS=5 ,FILTER=F200W;
ACT ,02 ,NISMAIN ,NINTS=2 ,NGROUPS=5 ,FILTER=F277W;
";

    /// A wavefront-sensing commissioning visit: two groups, a slew and a
    /// guide acquisition, a first-class dither, and exposures referencing a
    /// dither pattern via `DITHERID`.
    pub const WFSC_COMMISSIONING: &str = "\
# NIRCam Wavefront Sensing Commissioning
VISIT ,V00744008001 ,WFSVISIT=SENSING_ONLY;
GROUP ,1;
SEQ ,1;
SLEW ,01 ,SCSLEWMAIN ,GSRA=80.349 ,GSDEC=-69.5456 ,GSPA=155.0;
ACT ,02 ,FGSMAIN ,DETECTOR=GUIDER2;
SEQ ,2;
DITHER ,ID=1 ,DX=0.2 ,DY=0.3;
ACT ,03 ,NRCWFSCMAIN ,CONFIG=NRCA3_FP1 ,NGROUPS=5 ,NINTS=1 ,DITHERID=1;
GROUP ,2;
SEQ ,1;
AUX ,CONFIG=NRC Coarse Phasing;
ACT ,01 ,NRCMAIN ,CONFIG=NRCA3_FP1 ,NGROUPS=3 ,NINTS=2 ,DITHERID=1;
MOMENTUM ,DUMP=false;
";

    /// Second `GROUP ,1;` statement at line 5.
    pub const DUPLICATE_GROUP: &str = "\
VISIT ,V00783001001;
GROUP ,1;
SEQ ,1;
ACT ,01 ,NISMAIN;
GROUP ,1;
";

    /// A SEQ marker at line 2, before any group has opened.
    pub const SEQ_BEFORE_GROUP: &str = "\
VISIT ,V00783001001;
SEQ ,1;
";

    /// An activity keyword outside the default vocabulary at line 4.
    pub const UNKNOWN_KEYWORD: &str = "\
VISIT ,V00783001001;
GROUP ,1;
SEQ ,1;
WFSCPROBE ,01 ,NRCWFSCMAIN;
";

    /// A file cut off mid-statement: the final exposure has no terminator.
    pub const TRUNCATED: &str = "\
VISIT ,V00783001001;
GROUP ,1;
SEQ ,1;
ACT ,01 ,NISMAIN ,NINTS=2
";

    /// No structural content at all.
    pub const COMMENTS_ONLY: &str = "\
# NIRISS External Calibration

# nothing else follows
";
}
