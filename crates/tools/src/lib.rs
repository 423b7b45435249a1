//! chad エンジンの対局・検証ツール

pub mod selfplay;
