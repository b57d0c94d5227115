use bzen_files::world::vob::VobType;

/// Objects without a visual of their own (triggers, sounds, spawn points, ...) are represented by
/// the editor helper meshes the game ships with.
pub fn marker_visual(vob_type: VobType) -> Option<&'static str> {
    match vob_type {
        VobType::Startpoint => Some("invisible_zcvobstartpoint.mrm"),
        VobType::Spot => Some("invisible_zcvobspot.mrm"),
        VobType::Trigger | VobType::TriggerList | VobType::TriggerScript => Some("invisible_zctrigger.mrm"),
        VobType::TriggerChangeLevel => Some("invisible_zctriggerchangelevel.mrm"),
        VobType::CodeMaster | VobType::MessageFilter | VobType::MoverController | VobType::TriggerWorldStart => {
            Some("invisible_zccodemaster.mrm")
        }
        VobType::Light => Some("invisible_zcvoblight.mrm"),
        VobType::Sound => Some("invisible_zcvobsound.mrm"),
        VobType::SoundDaytime => Some("invisible_zcvobsounddaytime.mrm"),
        VobType::ZoneMusic | VobType::ZoneMusicDefault => Some("invisible_zczonemusic.mrm"),
        VobType::ZoneFog | VobType::ZoneFogDefault => Some("invisible_zczonezfog.mrm"),
        _ => None,
    }
}

pub fn is_marker(vob_type: VobType) -> bool {
    marker_visual(vob_type).is_some()
}
