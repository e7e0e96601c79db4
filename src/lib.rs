//! Quantum - PAES 自适应学习会话编排器
//!
//! 模块划分：
//! - **arsenal**: 由学生目标派生的规划视图（微认证、日程、分数预测、分科进度）
//! - **config**: 会话配置加载（TOML + 环境变量）
//! - **content**: 内容类型 / 认知层级识别、上下文内容增强、生成请求
//! - **companion**: 学习伙伴类型与生成
//! - **modes**: 焦点与学习模式、模式静态配置
//! - **services**: 注入的外部协作者接口与本地 Mock
//! - **core**: 会话状态、模式状态机、会话监管、编排器
//! - **experience**: 学习体验与自适应指标
//! - **vitals**: 指标采样与平滑回退

pub mod arsenal;
pub mod companion;
pub mod config;
pub mod content;
pub mod core;
pub mod experience;
pub mod modes;
pub mod observability;
pub mod services;
pub mod vitals;

pub use crate::core::{create_session_builder, Orchestrator, QuantumError, SessionBuilder};
