//! 캐시/키-값 저장소 모듈
//!
//! - [`redis`] - Redis 연결 래퍼 (`RedisClient`)

pub mod redis;
