#![allow(dead_code)]

pub mod incomelens_env;
pub mod stub_service;
