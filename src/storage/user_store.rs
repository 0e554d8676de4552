//! 用户与剧本存储（users.json + scripts.json）

use log::{debug, info};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use super::json_file;
use super::sample;
use super::workspace::ScriptWorkspace;
use super::{StorageError, StorageResult};
use crate::models::{Collection, Script, UserRecord};
use crate::utils::now_iso;

const USERS_FILE: &str = "users.json";
const SCRIPTS_FILE: &str = "scripts.json";

/// 用户存储
///
/// `scripts.json` 的结构是 `用户名 -> [剧本]`，每次修改后整文件重写。
#[derive(Debug)]
pub struct UserStore {
    users_path: PathBuf,
    scripts_path: PathBuf,
    users: Collection<UserRecord>,
    scripts: Collection<Vec<Script>>,
}

/// 密码的 SHA-256 十六进制摘要
pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

impl UserStore {
    /// 打开数据目录，不存在则创建
    ///
    /// users.json 或 scripts.json 无法解析时返回错误，不会得到一个
    /// 随后把空数据写回、覆盖原文件的存储。
    pub fn open(data_dir: impl AsRef<Path>) -> StorageResult<Self> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir).map_err(|source| StorageError::Io {
            path: data_dir.to_path_buf(),
            source,
        })?;

        let users_path = data_dir.join(USERS_FILE);
        let scripts_path = data_dir.join(SCRIPTS_FILE);
        let users: Collection<UserRecord> = json_file::load_or_default(&users_path)?;
        let scripts: Collection<Vec<Script>> = json_file::load_or_default(&scripts_path)?;
        debug!(
            "【storage】载入 {} 个用户, {} 组剧本",
            users.len(),
            scripts.len()
        );

        Ok(UserStore {
            users_path,
            scripts_path,
            users,
            scripts,
        })
    }

    fn save_users(&self) -> StorageResult<()> {
        json_file::save(&self.users_path, &self.users)
    }

    fn save_scripts(&self) -> StorageResult<()> {
        json_file::save(&self.scripts_path, &self.scripts)
    }

    /// 注册用户；用户名已存在时返回 `false`
    pub fn register_user(
        &mut self,
        username: &str,
        password: &str,
        email: &str,
    ) -> StorageResult<bool> {
        let username = username.trim();
        if username.is_empty() {
            return Err(StorageError::InvalidInput(
                "username must not be empty".to_string(),
            ));
        }
        if self.users.contains(username) {
            return Ok(false);
        }

        self.users.insert(
            username,
            UserRecord {
                password: hash_password(password),
                email: email.to_string(),
                created_at: now_iso(),
                last_login: None,
            },
        );
        if !self.scripts.contains(username) {
            self.scripts.insert(username, Vec::new());
        }

        self.save_users()?;
        self.save_scripts()?;
        info!("【storage】注册用户 {}", username);
        Ok(true)
    }

    /// 校验密码，成功时更新最后登录时间
    pub fn authenticate_user(&mut self, username: &str, password: &str) -> StorageResult<bool> {
        let hashed = hash_password(password);
        let record = match self.users.get_mut(username) {
            Some(record) if record.password == hashed => record,
            _ => return Ok(false),
        };
        record.last_login = Some(now_iso());
        self.save_users()?;
        Ok(true)
    }

    pub fn user_exists(&self, username: &str) -> bool {
        self.users.contains(username)
    }

    pub fn user(&self, username: &str) -> Option<&UserRecord> {
        self.users.get(username)
    }

    /// 新建空剧本，返回 id `<用户名>_<序号>_<unix 时间戳>`
    pub fn create_script(
        &mut self,
        username: &str,
        name: &str,
        description: &str,
    ) -> StorageResult<String> {
        if !self.scripts.contains(username) {
            self.scripts.insert(username, Vec::new());
        }
        let timestamp = chrono::Local::now().timestamp();
        let scripts = self
            .scripts
            .get_mut(username)
            .ok_or_else(|| StorageError::not_found("user", username))?;

        let mut n = scripts.len() + 1;
        let mut script_id = format!("{}_{}_{}", username, n, timestamp);
        while scripts.iter().any(|s| s.id == script_id) {
            n += 1;
            script_id = format!("{}_{}_{}", username, n, timestamp);
        }

        scripts.push(Script::new(&script_id, name, description, &now_iso()));
        self.save_scripts()?;
        info!("【storage】{} 新建剧本 {} ({})", username, name, script_id);
        Ok(script_id)
    }

    pub fn user_scripts(&self, username: &str) -> &[Script] {
        self.scripts
            .get(username)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn get_script(&self, username: &str, script_id: &str) -> Option<&Script> {
        self.user_scripts(username)
            .iter()
            .find(|s| s.id == script_id)
    }

    /// 以给定记录整体替换同 id 的剧本；找不到时返回 `false`
    pub fn update_script(&mut self, username: &str, mut script: Script) -> StorageResult<bool> {
        let slot = self
            .scripts
            .get_mut(username)
            .and_then(|scripts| scripts.iter_mut().find(|s| s.id == script.id));
        match slot {
            Some(slot) => {
                script.last_modified = now_iso();
                *slot = script;
            }
            None => return Ok(false),
        }
        self.save_scripts()?;
        Ok(true)
    }

    pub fn delete_script(&mut self, username: &str, script_id: &str) -> StorageResult<bool> {
        let removed = match self.scripts.get_mut(username) {
            Some(scripts) => {
                let before = scripts.len();
                scripts.retain(|s| s.id != script_id);
                scripts.len() != before
            }
            None => false,
        };
        if removed {
            self.save_scripts()?;
            info!("【storage】{} 删除剧本 {}", username, script_id);
        }
        Ok(removed)
    }

    /// 在剧本上执行一次修改，更新修改时间并落盘
    pub fn modify_script<R>(
        &mut self,
        username: &str,
        script_id: &str,
        f: impl FnOnce(&mut Script) -> R,
    ) -> StorageResult<R> {
        let script = self
            .scripts
            .get_mut(username)
            .and_then(|scripts| scripts.iter_mut().find(|s| s.id == script_id))
            .ok_or_else(|| StorageError::not_found("script", script_id))?;

        let result = f(script);
        script.last_modified = now_iso();
        self.save_scripts()?;
        Ok(result)
    }

    /// 绑定到某个用户的某个剧本上的工作区
    pub fn workspace<'a>(
        &'a mut self,
        username: &str,
        script_id: &str,
    ) -> StorageResult<ScriptWorkspace<'a>> {
        if self.get_script(username, script_id).is_none() {
            return Err(StorageError::not_found("script", script_id));
        }
        Ok(ScriptWorkspace::new(self, username, script_id))
    }

    /// 创建演示用户 Test 和示例剧本，返回剧本 id
    pub fn seed_sample_data(&mut self) -> StorageResult<String> {
        if !self.user_exists(sample::SAMPLE_USER) {
            self.register_user(
                sample::SAMPLE_USER,
                sample::SAMPLE_PASSWORD,
                sample::SAMPLE_EMAIL,
            )?;
        }

        let script_id = self.create_script(
            sample::SAMPLE_USER,
            sample::SAMPLE_SCRIPT_NAME,
            sample::SAMPLE_SCRIPT_DESCRIPTION,
        )?;

        self.modify_script(sample::SAMPLE_USER, &script_id, |script| {
            for (i, character) in sample::sample_characters().into_iter().enumerate() {
                script.characters.insert((i + 1).to_string(), character);
            }
            for (i, location) in sample::sample_locations().into_iter().enumerate() {
                script.locations.insert((i + 1).to_string(), location);
            }
            for (i, scene) in sample::sample_scenes().into_iter().enumerate() {
                script.scenes.insert((i + 1).to_string(), scene);
            }
        })?;

        info!("【storage】示例数据已写入 {}", script_id);
        Ok(script_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_sha256_hex() {
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn register_and_authenticate() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = UserStore::open(dir.path()).unwrap();

        assert!(store.register_user("ana", "pw", "a@b.c").unwrap());
        assert!(!store.register_user("ana", "other", "").unwrap());
        assert!(store.register_user("  ", "pw", "").is_err());

        assert!(!store.authenticate_user("ana", "wrong").unwrap());
        assert!(store.user("ana").unwrap().last_login.is_none());
        assert!(store.authenticate_user("ana", "pw").unwrap());
        assert!(store.user("ana").unwrap().last_login.is_some());
        assert!(!store.authenticate_user("nobody", "pw").unwrap());
    }

    #[test]
    fn script_ids_follow_user_count_timestamp_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = UserStore::open(dir.path()).unwrap();
        let first = store.create_script("ana", "One", "").unwrap();
        let second = store.create_script("ana", "Two", "").unwrap();

        assert!(first.starts_with("ana_1_"));
        assert!(second.starts_with("ana_2_"));
        assert_eq!(store.user_scripts("ana").len(), 2);
        assert!(store.delete_script("ana", &first).unwrap());
        assert!(!store.delete_script("ana", &first).unwrap());
        assert_eq!(store.user_scripts("ana")[0].name, "Two");
    }

    #[test]
    fn data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let script_id = {
            let mut store = UserStore::open(dir.path()).unwrap();
            store.seed_sample_data().unwrap()
        };

        let store = UserStore::open(dir.path()).unwrap();
        assert!(store.user_exists("Test"));
        let script = store.get_script("Test", &script_id).unwrap();
        assert_eq!(script.name, "The Investigation");
        assert_eq!(script.characters.len(), 3);
        assert_eq!(script.locations.len(), 4);
        let ids: Vec<&str> = script.scenes.ids().collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn unreadable_scripts_file_is_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SCRIPTS_FILE);
        fs::write(&path, r#"{"ana": [{"id": "#).unwrap();

        assert!(matches!(
            UserStore::open(dir.path()),
            Err(StorageError::Json { .. })
        ));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            r#"{"ana": [{"id": "#
        );
    }
}
