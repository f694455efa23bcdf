use serde_json::{Value, json};

/// A small checkout trace as exported by a collector: frontend calls cart and
/// payments over HTTP, cart talks to redis, payments to postgres, and one span
/// carries no attributes at all.
pub fn sample_trace() -> Value {
    json!([
        {
            "service": "frontend",
            "trace_id": "4bf92f3577b34da6a3ce929d0e0e4736",
            "id": "a1",
            "parent_id": null,
            "name": "GET /checkout",
            "timestamp": 1_769_904_000_000_000_i64,
            "duration": 182_000,
            "status": "OK",
            "kind": "SERVER",
            "resource": {"host.name": "frontend-7c9f", "k8s.namespace.name": "shop"},
            "attributes": {
                "http.request.method": "GET",
                "http.route": "/checkout",
                "http.response.status_code": 200,
                "url.path": "/checkout",
                "url.scheme": "https",
                "user_agent.original": "Mozilla/5.0",
                "network.protocol.version": "1.1"
            }
        },
        {
            "service": "frontend",
            "trace_id": "4bf92f3577b34da6a3ce929d0e0e4736",
            "id": "a2",
            "parent_id": "a1",
            "name": "GET",
            "timestamp": 1_769_904_000_010_000_i64,
            "duration": 41_000,
            "status": "OK",
            "kind": "CLIENT",
            "attributes": {
                "http.request.method": "GET",
                "http.response.status_code": 200,
                "server.address": "cart",
                "server.port": 8080,
                "url.full": "http://cart:8080/api/cart/42",
                "network.peer.address": "10.42.0.17",
                "thread.name": "reactor-http-nio-3"
            }
        },
        {
            "service": "frontend",
            "trace_id": "4bf92f3577b34da6a3ce929d0e0e4736",
            "id": "a3",
            "parent_id": "a1",
            "name": "POST",
            "timestamp": 1_769_904_000_060_000_i64,
            "duration": 95_000,
            "status": "OK",
            "kind": "CLIENT",
            "attributes": {
                "http.request.method": "POST",
                "http.response.status_code": 201,
                "server.address": "payments",
                "server.port": 9090,
                "url.full": "http://payments:9090/api/charge",
                "network.peer.address": "10.42.0.23"
            }
        },
        {
            "service": "frontend",
            "trace_id": "4bf92f3577b34da6a3ce929d0e0e4736",
            "id": "a4",
            "parent_id": "a1",
            "name": "POST",
            "timestamp": 1_769_904_000_160_000_i64,
            "duration": 12_000,
            "status": "OK",
            "kind": "CLIENT",
            "attributes": {
                "http.request.method": "POST",
                "server.address": "cart",
                "server.port": 8080,
                "url.full": "http://cart:8080/api/cart/42/clear"
            }
        },
        {
            "service": "cart",
            "trace_id": "4bf92f3577b34da6a3ce929d0e0e4736",
            "id": "b1",
            "parent_id": "a2",
            "name": "HGET",
            "timestamp": 1_769_904_000_015_000_i64,
            "duration": 2_000,
            "status": "OK",
            "kind": "CLIENT",
            "attributes": {
                "db.system": "redis",
                "server.address": "redis-master",
                "server.port": 6379,
                "url.full": "redis://redis-master:6379/0"
            }
        },
        {
            "service": "payments",
            "trace_id": "4bf92f3577b34da6a3ce929d0e0e4736",
            "id": "c1",
            "parent_id": "a3",
            "name": "INSERT charges",
            "timestamp": 1_769_904_000_070_000_i64,
            "duration": 30_000,
            "status": "OK",
            "kind": "CLIENT",
            "attributes": {
                "db.system": "postgresql",
                "url.full": "http://orders-postgres:5432/charges"
            }
        },
        {
            "service": "payments",
            "trace_id": "4bf92f3577b34da6a3ce929d0e0e4736",
            "id": "c2",
            "parent_id": "a3",
            "name": "GET",
            "timestamp": 1_769_904_000_110_000_i64,
            "duration": 20_000,
            "status": "ERROR",
            "kind": "CLIENT",
            "attributes": {
                "url.full": "GET https://fraud-check/api/score"
            }
        },
        {
            "service": "payments",
            "trace_id": "4bf92f3577b34da6a3ce929d0e0e4736",
            "id": "c3",
            "parent_id": "a3",
            "name": "GET",
            "timestamp": 1_769_904_000_140_000_i64,
            "duration": 3_000,
            "status": "OK",
            "kind": "CLIENT",
            "attributes": {
                "http.request.method": "GET",
                "url.full": "http://payments/health"
            }
        },
        {
            "service": "shipping",
            "trace_id": "9c2a1f0e3b7d4c5e8f6a7b8c9d0e1f2a",
            "id": "d1",
            "name": "scheduled-sync",
            "timestamp": 1_769_904_100_000_000_i64,
            "duration": 500_000,
            "status": "OK"
        }
    ])
}

/// Expected service order of the graph built from [`sample_trace`].
pub const SAMPLE_SERVICES: [&str; 5] = ["frontend", "cart", "payments", "fraud-check", "shipping"];
