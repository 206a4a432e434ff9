mod common;
mod iban;
mod lei;
mod scoring;
mod service;
