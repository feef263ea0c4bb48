#![allow(dead_code)]

use astrum::core::{ConfirmKind, UserInterface};
use astrum::file::DirectoryReader;
use astrum::FileManager;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

/// 事前に決めた応答を返すテスト用UI
#[derive(Debug, Default)]
pub struct ScriptedUi {
    pub answers: VecDeque<bool>,
    pub inputs: VecDeque<Option<String>>,
    pub confirmations: Vec<(String, ConfirmKind)>,
    pub prompts: Vec<(String, String, String)>,
    pub errors: Vec<String>,
    pub infos: Vec<String>,
}

impl ScriptedUi {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn typing(inputs: &[Option<&str>]) -> Self {
        Self {
            inputs: inputs.iter().map(|input| input.map(str::to_string)).collect(),
            ..Self::default()
        }
    }
}

impl UserInterface for ScriptedUi {
    fn confirm(&mut self, message: &str, kind: ConfirmKind) -> bool {
        self.confirmations.push((message.to_string(), kind));
        self.answers.pop_front().unwrap_or(false)
    }

    fn prompt_text(&mut self, title: &str, placeholder: &str, default_value: &str) -> Option<String> {
        self.prompts
            .push((title.to_string(), placeholder.to_string(), default_value.to_string()));
        self.inputs.pop_front().flatten()
    }

    fn notify_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn notify_info(&mut self, message: &str) {
        self.infos.push(message.to_string());
    }
}

/// 3ファイル + 1ディレクトリの典型的なホームディレクトリ
pub fn populate_home(root: &Path) {
    fs::write(root.join("doc.txt"), "notes").unwrap();
    fs::write(root.join("song.mp3"), vec![0u8; 2048]).unwrap();
    fs::write(root.join("photo.jpg"), vec![0u8; 4096]).unwrap();
    fs::create_dir(root.join("projects")).unwrap();
}

pub fn manager_at(path: &Path) -> FileManager {
    let mut manager = FileManager::with_reader(DirectoryReader::new(), Vec::new());
    manager.navigate_to(path);
    manager
}
