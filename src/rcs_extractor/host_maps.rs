use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};

/// Host substitutions applied to every stream url. The slice order is the
/// application order: the vr360 entry keys off the akamaized host produced
/// by the first entry, and the `.net//` collapse has to run after all of
/// the host rewrites that can leave a doubled slash behind.
pub static ALL_REPLACE: &[(&str, &str)] = &[
    (
        "media2vam.corriere.it.edgesuite.net",
        "media2vam-corriere-it.akamaized.net",
    ),
    (
        "media.youreporter.it.edgesuite.net",
        "media-youreporter-it.akamaized.net",
    ),
    (
        "corrierepmd.corriere.it.edgesuite.net",
        "corrierepmd-corriere-it.akamaized.net",
    ),
    (
        "media2vam-corriere-it.akamaized.net/fcs.quotidiani/vr/videos/",
        "video.corriere.it/vr360/videos/",
    ),
    (".net//", ".net/"),
];

/// Local-edition hosts that were retired together with the mp4 delivery
/// network. Applied after [`ALL_REPLACE`], in order.
pub static MP4_REPLACE: &[(&str, &str)] = &[
    (
        "media2vam.corbologna.corriere.it.edgesuite.net",
        "media2vam-bologna-corriere-it.akamaized.net",
    ),
    (
        "media2vam.corfiorentino.corriere.it.edgesuite.net",
        "media2vam-fiorentino-corriere-it.akamaized.net",
    ),
    (
        "media2vam.cormezzogiorno.corriere.it.edgesuite.net",
        "media2vam-mezzogiorno-corriere-it.akamaized.net",
    ),
    (
        "media2vam.corveneto.corriere.it.edgesuite.net",
        "media2vam-veneto-corriere-it.akamaized.net",
    ),
    (
        "media2.oggi.it.edgesuite.net",
        "media2-oggi-it.akamaized.net",
    ),
    (
        "media2.quimamme.it.edgesuite.net",
        "media2-quimamme-it.akamaized.net",
    ),
    (
        "media2.amica.it.edgesuite.net",
        "media2-amica-it.akamaized.net",
    ),
    (
        "media2.living.corriere.it.edgesuite.net",
        "media2-living-corriere-it.akamaized.net",
    ),
    (
        "media2.style.corriere.it.edgesuite.net",
        "media2-style-corriere-it.akamaized.net",
    ),
    (
        "media2.iodonna.it.edgesuite.net",
        "media2-iodonna-it.akamaized.net",
    ),
    (
        "media2.leitv.it.edgesuite.net",
        "media2-leitv-it.akamaized.net",
    ),
];

lazy_static! {
    /// Legacy streaming host token -> short site code used by the unified
    /// `vod.rcsobjects.it` object store. A host missing from this table is
    /// an extraction-aborting error, keeping the table in sync with the
    /// origin is a maintenance task.
    pub static ref MIGRATION_MAP: HashMap<&'static str, &'static str> = [
        ("videoamica-vh.akamaihd", "amica"),
        ("media2-amica-it.akamaized", "amica"),
        ("corrierevam-vh.akamaihd", "corriere"),
        ("media2vam-corriere-it.akamaized", "corriere"),
        ("cormezzogiorno-vh.akamaihd", "corrieredelmezzogiorno"),
        ("media2vam-mezzogiorno-corriere-it.akamaized", "corrieredelmezzogiorno"),
        ("corveneto-vh.akamaihd", "corrieredelveneto"),
        ("media2vam-veneto-corriere-it.akamaized", "corrieredelveneto"),
        ("corbologna-vh.akamaihd", "corrieredibologna"),
        ("media2vam-bologna-corriere-it.akamaized", "corrieredibologna"),
        ("corfiorentino-vh.akamaihd", "corrierefiorentino"),
        ("media2vam-fiorentino-corriere-it.akamaized", "corrierefiorentino"),
        ("corinnovazione-vh.akamaihd", "corriereinnovazione"),
        ("media2-gazzanet-gazzetta-it.akamaized", "gazzanet"),
        ("videogazzanet-vh.akamaihd", "gazzanet"),
        ("videogazzaworld-vh.akamaihd", "gazzaworld"),
        ("gazzettavam-vh.akamaihd", "gazzetta"),
        ("media2vam-gazzetta-it.akamaized", "gazzetta"),
        ("videoiodonna-vh.akamaihd", "iodonna"),
        ("media2-leitv-it.akamaized", "leitv"),
        ("videoleitv-vh.akamaihd", "leitv"),
        ("videoliving-vh.akamaihd", "living"),
        ("media2-living-corriere-it.akamaized", "living"),
        ("media2-oggi-it.akamaized", "oggi"),
        ("videooggi-vh.akamaihd", "oggi"),
        ("media2-quimamme-it.akamaized", "quimamme"),
        ("quimamme-vh.akamaihd", "quimamme"),
        ("videorunning-vh.akamaihd", "running"),
        ("media2-style-corriere-it.akamaized", "style"),
        ("style-vh.akamaihd", "style"),
        ("videostyle-vh.akamaihd", "style"),
        ("media2-stylepiccoli-it.akamaized", "stylepiccoli"),
        ("stylepiccoli-vh.akamaihd", "stylepiccoli"),
        ("doveviaggi-vh.akamaihd", "viaggi"),
        ("media2-doveviaggi-it.akamaized", "viaggi"),
        ("media2-vivimilano-corriere-it.akamaized", "vivimilano"),
        ("vivimilano-vh.akamaihd", "vivimilano"),
        ("media2-youreporter-it.akamaized", "youreporter"),
    ]
    .iter()
    .cloned()
    .collect();

    /// Legacy hosts that moved to the shared `corriereobjects.it` media
    /// store instead of a per-site code. Takes precedence over
    /// [`MIGRATION_MAP`] during the mp4 cdn switch.
    pub static ref MIGRATION_MEDIA: HashSet<&'static str> = [
        "advrcs-vh.akamaihd",
        "corriere-f.akamaihd",
        "corrierepmd-corriere-it.akamaized",
        "corrprotetto-vh.akamaihd",
        "gazzetta-f.akamaihd",
        "gazzettapmd-gazzetta-it.akamaized",
        "gazzprotetto-vh.akamaihd",
        "periodici-f.akamaihd",
        "periodicisecure-vh.akamaihd",
        "videocoracademy-vh.akamaihd",
    ]
    .iter()
    .cloned()
    .collect();
}
