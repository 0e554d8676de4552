//! 剧本工作区：绑定到一个用户的一个剧本上的增删改查

use log::debug;

use super::query::{self, ScriptStatistics};
use super::user_store::UserStore;
use super::{StorageError, StorageResult};
use crate::models::{AssetKind, Character, Collection, Location, Note, Scene, Script};
use crate::utils::{now_iso, ExportConstants};

/// 剧本工作区
///
/// 新记录的 id 取 `当前数量 + 1`；所有修改立即写回 scripts.json。
pub struct ScriptWorkspace<'a> {
    store: &'a mut UserStore,
    username: String,
    script_id: String,
}

impl<'a> ScriptWorkspace<'a> {
    pub(crate) fn new(store: &'a mut UserStore, username: &str, script_id: &str) -> Self {
        ScriptWorkspace {
            store,
            username: username.to_string(),
            script_id: script_id.to_string(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn script_id(&self) -> &str {
        &self.script_id
    }

    pub fn script(&self) -> StorageResult<&Script> {
        self.store
            .get_script(&self.username, &self.script_id)
            .ok_or_else(|| StorageError::not_found("script", &self.script_id))
    }

    fn modify<R>(&mut self, f: impl FnOnce(&mut Script) -> R) -> StorageResult<R> {
        self.store.modify_script(&self.username, &self.script_id, f)
    }

    fn add_to<T>(
        &mut self,
        kind: AssetKind,
        value: T,
        select: impl FnOnce(&mut Script) -> &mut Collection<T>,
    ) -> StorageResult<String> {
        let id = self.modify(|script| {
            let collection = select(script);
            let id = collection.next_id();
            collection.insert(id.clone(), value);
            id
        })?;
        debug!("【workspace】{} 新增 {}", kind.as_str(), id);
        Ok(id)
    }

    fn replace_in<T>(
        &mut self,
        id: &str,
        value: T,
        select: impl FnOnce(&mut Script) -> &mut Collection<T>,
    ) -> StorageResult<bool> {
        self.modify(|script| {
            let collection = select(script);
            match collection.get_mut(id) {
                Some(slot) => {
                    *slot = value;
                    true
                }
                None => false,
            }
        })
    }

    fn remove_from<T>(
        &mut self,
        id: &str,
        select: impl FnOnce(&mut Script) -> &mut Collection<T>,
    ) -> StorageResult<bool> {
        self.modify(|script| select(script).remove(id).is_some())
    }

    /// 带当前时间戳的条目；空白文本报错
    fn stamped(kind: &str, text: &str) -> StorageResult<Note> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StorageError::InvalidInput(format!(
                "{} must not be empty",
                kind
            )));
        }
        Ok(Note::stamped(text, &now_iso()))
    }

    /// 向场景的某个条目列表追加一条，并刷新 updated_at；场景不存在返回 `false`
    fn append_to_scene(
        &mut self,
        id: &str,
        entry: Note,
        select: impl FnOnce(&mut Scene) -> &mut Vec<Note>,
    ) -> StorageResult<bool> {
        self.modify(|script| match script.scenes.get_mut(id) {
            Some(scene) => {
                scene.updated_at = entry.timestamp.clone();
                select(scene).push(entry);
                true
            }
            None => false,
        })
    }

    // ---- 角色 ----

    pub fn add_character(&mut self, character: Character) -> StorageResult<String> {
        if character.name.trim().is_empty() {
            return Err(StorageError::InvalidInput(
                "character name must not be empty".to_string(),
            ));
        }
        self.add_to(AssetKind::Characters, character, |s| &mut s.characters)
    }

    pub fn characters(&self) -> StorageResult<&Collection<Character>> {
        Ok(&self.script()?.characters)
    }

    pub fn character_names(&self) -> StorageResult<Vec<String>> {
        Ok(self
            .characters()?
            .values()
            .map(|c| {
                if c.name.is_empty() {
                    ExportConstants::UNKNOWN_NAME.to_string()
                } else {
                    c.name.clone()
                }
            })
            .collect())
    }

    pub fn update_character(&mut self, id: &str, character: Character) -> StorageResult<bool> {
        self.replace_in(id, character, |s| &mut s.characters)
    }

    pub fn delete_character(&mut self, id: &str) -> StorageResult<bool> {
        self.remove_from(id, |s: &mut Script| &mut s.characters)
    }

    pub fn search_characters(&self, query: &str) -> StorageResult<Vec<Character>> {
        Ok(query::search_characters(self.script()?, query))
    }

    /// 追加一条角色备注；角色不存在返回 `false`
    pub fn add_character_note(&mut self, id: &str, note: &str) -> StorageResult<bool> {
        let entry = Self::stamped("note", note)?;
        self.modify(|script| match script.characters.get_mut(id) {
            Some(character) => {
                character.notes.push(entry);
                true
            }
            None => false,
        })
    }

    // ---- 场景 ----

    /// 新增场景；id 同时写入记录本身
    pub fn add_scene(&mut self, mut scene: Scene) -> StorageResult<String> {
        let now = now_iso();
        if scene.created_at.is_none() {
            scene.created_at = Some(now.clone());
        }
        scene.updated_at = Some(now);
        self.modify(|script| {
            let id = script.scenes.next_id();
            scene.id = Some(id.clone());
            script.scenes.insert(id.clone(), scene);
            id
        })
    }

    pub fn scenes(&self) -> StorageResult<&Collection<Scene>> {
        Ok(&self.script()?.scenes)
    }

    /// 按插入顺序排列的场景
    pub fn scene_sequence(&self) -> StorageResult<Vec<Scene>> {
        Ok(self.scenes()?.to_vec())
    }

    /// 按场景编号排序
    pub fn scenes_by_number(&self) -> StorageResult<Vec<Scene>> {
        Ok(query::scenes_by_number(self.script()?))
    }

    pub fn update_scene(&mut self, id: &str, mut scene: Scene) -> StorageResult<bool> {
        scene.id = Some(id.to_string());
        scene.updated_at = Some(now_iso());
        self.replace_in(id, scene, |s| &mut s.scenes)
    }

    pub fn delete_scene(&mut self, id: &str) -> StorageResult<bool> {
        self.remove_from(id, |s: &mut Script| &mut s.scenes)
    }

    pub fn search_scenes(&self, query: &str) -> StorageResult<Vec<Scene>> {
        Ok(query::search_scenes(self.script()?, query))
    }

    pub fn scenes_by_character(&self, name: &str) -> StorageResult<Vec<Scene>> {
        Ok(query::scenes_by_character(self.script()?, name))
    }

    pub fn scenes_by_location(&self, location: &str) -> StorageResult<Vec<Scene>> {
        Ok(query::scenes_by_location(self.script()?, location))
    }

    pub fn scenes_by_setting(&self, setting: &str) -> StorageResult<Vec<Scene>> {
        Ok(query::scenes_by_setting(self.script()?, setting))
    }

    pub fn add_scene_note(&mut self, id: &str, note: &str) -> StorageResult<bool> {
        let entry = Self::stamped("note", note)?;
        self.append_to_scene(id, entry, |scene| &mut scene.notes)
    }

    pub fn add_scene_beat(&mut self, id: &str, beat: &str) -> StorageResult<bool> {
        let entry = Self::stamped("beat", beat)?;
        self.append_to_scene(id, entry, |scene| &mut scene.beats)
    }

    pub fn statistics(&self) -> StorageResult<ScriptStatistics> {
        Ok(ScriptStatistics::compute(self.script()?))
    }

    // ---- 地点 ----

    pub fn add_location(&mut self, location: Location) -> StorageResult<String> {
        if location.name.trim().is_empty() {
            return Err(StorageError::InvalidInput(
                "location name must not be empty".to_string(),
            ));
        }
        self.add_to(AssetKind::Locations, location, |s| &mut s.locations)
    }

    pub fn locations(&self) -> StorageResult<&Collection<Location>> {
        Ok(&self.script()?.locations)
    }

    pub fn location_names(&self) -> StorageResult<Vec<String>> {
        Ok(self
            .locations()?
            .values()
            .map(|l| {
                if l.name.is_empty() {
                    ExportConstants::UNKNOWN_NAME.to_string()
                } else {
                    l.name.clone()
                }
            })
            .collect())
    }

    pub fn update_location(&mut self, id: &str, location: Location) -> StorageResult<bool> {
        self.replace_in(id, location, |s| &mut s.locations)
    }

    pub fn delete_location(&mut self, id: &str) -> StorageResult<bool> {
        self.remove_from(id, |s: &mut Script| &mut s.locations)
    }

    pub fn search_locations(&self, query: &str) -> StorageResult<Vec<Location>> {
        Ok(query::search_locations(self.script()?, query))
    }

    pub fn locations_by_type(&self, location_type: &str) -> StorageResult<Vec<Location>> {
        Ok(query::locations_by_type(self.script()?, location_type))
    }

    /// 追加一条地点备注；地点不存在返回 `false`
    pub fn add_location_note(&mut self, id: &str, note: &str) -> StorageResult<bool> {
        let entry = Self::stamped("note", note)?;
        self.modify(|script| match script.locations.get_mut(id) {
            Some(location) => {
                location.notes.push(entry);
                true
            }
            None => false,
        })
    }
}
