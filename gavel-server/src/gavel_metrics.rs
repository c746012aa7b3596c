use {
    axum_prometheus::metrics,
    std::{
        fmt::Debug,
        time::Instant,
    },
    tracing::{
        field::{
            Field,
            Visit,
        },
        span::Record,
        Id,
    },
    tracing_subscriber::{
        layer::Context,
        Layer,
    },
};

#[derive(Debug, Clone)]
pub struct MetricsLayerData {
    category:   String,
    started_at: std::time::Instant,
    result:     String,
    name:       String,
}

/// Turns instrumented spans with `target = "metrics"` into Prometheus series:
/// a `{category}_duration_seconds` histogram and a `{category}_total` counter,
/// both labelled with the span's `name` and `result` fields.
pub struct MetricsLayer;

impl Visit for MetricsLayerData {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "result" {
            self.result = format!("{:?}", value);
        }
    }
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "category" {
            self.category = value.to_string();
        } else if field.name() == "result" {
            self.result = value.to_string();
        } else if field.name() == "name" {
            self.name = value.to_string();
        }
    }
}

impl Default for MetricsLayerData {
    fn default() -> MetricsLayerData {
        MetricsLayerData {
            category:   "unknown".to_string(),
            started_at: Instant::now(),
            result:     "unknown".to_string(),
            name:       "unknown".to_string(),
        }
    }
}

impl MetricsLayerData {
    fn new(name: String) -> MetricsLayerData {
        MetricsLayerData {
            name,
            ..MetricsLayerData::default()
        }
    }
}

impl<S> Layer<S> for MetricsLayer
where
    S: tracing::Subscriber,
    S: for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        id: &tracing::span::Id,
        ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        if !attrs.metadata().target().starts_with("metrics") {
            return;
        }
        match ctx.span(id) {
            Some(span) => {
                let mut data = MetricsLayerData::new(span.metadata().name().to_string());
                attrs.record(&mut data);
                span.extensions_mut().replace(data);
            }
            None => tracing::error!("span not found: {:?}", id),
        }
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        match ctx.span(id) {
            Some(span) => {
                let mut extension_mut = span.extensions_mut();
                if let Some(data) = extension_mut.get_mut::<MetricsLayerData>() {
                    values.record(data);
                }
            }
            None => tracing::error!("span not found: {:?}", id),
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        match ctx.span(&id) {
            Some(span) => {
                if let Some(data) = span.extensions().get::<MetricsLayerData>() {
                    let latency = (Instant::now() - data.started_at).as_secs_f64();
                    let labels = [("name", data.name.clone()), ("result", data.result.clone())];
                    metrics::histogram!(format!("{}_duration_seconds", data.category), &labels)
                        .record(latency);
                    metrics::counter!(format!("{}_total", data.category), &labels).increment(1);
                }
            }
            None => tracing::error!("span not found: {:?}", id),
        }
    }
}
