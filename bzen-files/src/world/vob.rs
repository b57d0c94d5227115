use crate::common::types::{Mat3x3, Vec2f, Vec3f};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VobType {
    Vob,
    LevelCompo,
    Item,
    Npc,
    Mob,
    MobInter,
    MobBed,
    MobFire,
    MobLadder,
    MobSwitch,
    MobWheel,
    MobContainer,
    MobDoor,
    PfxController,
    Animate,
    LensFlare,
    Light,
    Spot,
    Startpoint,
    Sound,
    SoundDaytime,
    ZoneMusic,
    ZoneMusicDefault,
    ZoneFog,
    ZoneFogDefault,
    ZoneFarPlane,
    ZoneFarPlaneDefault,
    MessageFilter,
    CodeMaster,
    Trigger,
    TriggerList,
    TriggerScript,
    TriggerChangeLevel,
    TriggerWorldStart,
    TriggerUntouch,
    Mover,
    MoverController,
    Earthquake,
    MusicController,
    TouchDamage,
    Stair,
    CsCamera,
    CameraKeyFrame,
    Unknown,
}

/// Engine class name of every known object type. The first match wins for the reverse lookup.
const CLASS_NAMES: &[(&str, VobType)] = &[
    ("zCVob", VobType::Vob),
    ("zCVobLevelCompo", VobType::LevelCompo),
    ("oCItem", VobType::Item),
    ("oCNpc", VobType::Npc),
    ("oCMOB", VobType::Mob),
    ("oCMobInter", VobType::MobInter),
    ("oCMobBed", VobType::MobBed),
    ("oCMobFire", VobType::MobFire),
    ("oCMobLadder", VobType::MobLadder),
    ("oCMobSwitch", VobType::MobSwitch),
    ("oCMobWheel", VobType::MobWheel),
    ("oCMobContainer", VobType::MobContainer),
    ("oCMobDoor", VobType::MobDoor),
    ("zCPFXControler", VobType::PfxController),
    ("zCVobAnimate", VobType::Animate),
    ("zCVobLensFlare", VobType::LensFlare),
    ("zCVobLight", VobType::Light),
    ("zCVobSpot", VobType::Spot),
    ("zCVobStartpoint", VobType::Startpoint),
    ("zCVobSound", VobType::Sound),
    ("zCVobSoundDaytime", VobType::SoundDaytime),
    ("oCZoneMusic", VobType::ZoneMusic),
    ("oCZoneMusicDefault", VobType::ZoneMusicDefault),
    ("zCZoneZFog", VobType::ZoneFog),
    ("zCZoneZFogDefault", VobType::ZoneFogDefault),
    ("zCZoneVobFarPlane", VobType::ZoneFarPlane),
    ("zCZoneVobFarPlaneDefault", VobType::ZoneFarPlaneDefault),
    ("zCMessageFilter", VobType::MessageFilter),
    ("zCCodeMaster", VobType::CodeMaster),
    ("zCTrigger", VobType::Trigger),
    ("zCTriggerList", VobType::TriggerList),
    ("oCTriggerScript", VobType::TriggerScript),
    ("oCTriggerChangeLevel", VobType::TriggerChangeLevel),
    ("zCTriggerWorldStart", VobType::TriggerWorldStart),
    ("zCTriggerUntouch", VobType::TriggerUntouch),
    ("zCMover", VobType::Mover),
    ("zCMoverControler", VobType::MoverController),
    ("zCEarthquake", VobType::Earthquake),
    ("zCMusicControler", VobType::MusicController),
    ("oCTouchDamage", VobType::TouchDamage),
    ("zCVobStair", VobType::Stair),
    ("zCCSCamera", VobType::CsCamera),
    ("zCCamTrj_KeyFrame", VobType::CameraKeyFrame),
];

impl VobType {
    /// Resolves an archived class name such as `oCMobFire:oCMobInter:oCMOB:zCVob`. Only the most
    /// derived class (the first segment) is considered.
    pub fn from_class_name(class_name: &str) -> VobType {
        let most_derived = class_name.split(':').next().unwrap_or_default().trim();
        CLASS_NAMES
            .iter()
            .find(|(name, _)| *name == most_derived)
            .map(|(_, vob_type)| *vob_type)
            .unwrap_or(VobType::Unknown)
    }

    pub fn class_name(&self) -> &'static str {
        CLASS_NAMES
            .iter()
            .find(|(_, vob_type)| vob_type == self)
            .map(|(name, _)| *name)
            .unwrap_or("unknown")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisualDecal {
    /// Half extents of the quad, in engine units.
    pub dimension: Vec2f,
    pub offset: Vec2f,
    pub two_sided: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VisualKind {
    Decal(VisualDecal),
    Mesh,
    MultiResolutionMesh,
    ParticleEffect,
    AiCamera,
    Model,
    MorphMesh,
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Visual {
    /// The visual's source name, e.g. `CHESTBIG_OCCHESTLARGE.MDS`
    pub name: String,
    pub kind: VisualKind,
}

/// A placed, typed entity of the world's object tree.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualObject {
    pub id: u32,
    pub name: String,
    pub vob_type: VobType,
    pub visual: Option<Visual>,
    pub position: Vec3f,
    pub rotation: Mat3x3,
    pub children: Vec<VirtualObject>,
}

impl VirtualObject {
    pub fn new(id: u32, name: impl Into<String>, vob_type: VobType) -> Self {
        Self {
            id,
            name: name.into(),
            vob_type,
            visual: None,
            position: Vec3f::default(),
            rotation: Mat3x3::IDENTITY,
            children: Vec::new(),
        }
    }

    pub fn with_visual(mut self, name: impl Into<String>, kind: VisualKind) -> Self {
        self.visual = Some(Visual {
            name: name.into(),
            kind,
        });
        self
    }

    pub fn with_position(mut self, position: Vec3f) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Mat3x3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_children(mut self, children: Vec<VirtualObject>) -> Self {
        self.children = children;
        self
    }
}
