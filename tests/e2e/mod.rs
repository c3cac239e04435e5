mod engine_smoke;
mod scenarios;
