//! HTML shell for rendered maps.
//!
//! The page loads Leaflet and the minimap plugin from public CDNs and
//! builds every layer client-side from the embedded JSON document.

/// Placeholder replaced with the serialized map document.
pub const CONFIG_PLACEHOLDER: &str = "__MAP_CONFIG__";

/// Full HTML page; [`CONFIG_PLACEHOLDER`] marks where the map JSON goes.
pub const MAP_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>REAL-UP Map</title>
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" crossorigin="">
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet-minimap/3.6.1/Control.MiniMap.min.css">
    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" crossorigin=""></script>
    <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet-minimap/3.6.1/Control.MiniMap.min.js"></script>
    <style>
        html, body { width: 100%; height: 100%; margin: 0; padding: 0; }
        #map { position: absolute; top: 0; bottom: 0; left: 0; right: 0; }
        .realup-table th { text-align: left; padding-right: 8px; vertical-align: top; }
    </style>
</head>
<body>
    <div id="map"></div>
    <script>
        const config = __MAP_CONFIG__;
        const tiles = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
        const attribution = "&copy; OpenStreetMap contributors";

        const map = L.map("map").setView(config.center, config.zoom);
        L.tileLayer(tiles, { maxZoom: 19, attribution }).addTo(map);

        if (config.minimap) {
            new L.Control.MiniMap(L.tileLayer(tiles, { attribution }), { toggleDisplay: true }).addTo(map);
        }

        function fieldTable(props, table) {
            const rows = table.fields
                .map((field, i) => `<tr><th>${table.aliases[i]}</th><td>${props[field] ?? ""}</td></tr>`)
                .join("");
            return `<table class="realup-table">${rows}</table>`;
        }

        const overlays = {};
        for (const layer of config.layers) {
            let group;
            if (layer.kind === "regions") {
                group = L.geoJSON(layer.data, {
                    style: () => ({
                        color: layer.style.color,
                        weight: layer.style.weight,
                        fillOpacity: layer.style.fill_opacity,
                    }),
                    onEachFeature: (feature, shape) => {
                        const props = feature.properties || {};
                        shape.bindTooltip(fieldTable(props, layer.tooltip), { sticky: false });
                        shape.bindPopup(
                            `<div style="${layer.popup.style}">${fieldTable(props, layer.popup.table)}</div>`,
                            { maxWidth: layer.popup.max_width },
                        );
                    },
                });
            } else {
                group = L.featureGroup(
                    layer.markers.map((marker) =>
                        L.circleMarker(marker.location, {
                            radius: marker.radius,
                            color: layer.color,
                            fillColor: layer.color,
                            fill: true,
                        }).bindTooltip(marker.tooltip),
                    ),
                );
            }
            group.addTo(map);
            overlays[layer.name] = group;
        }

        if (config.layer_control) {
            L.control.layers(null, overlays, { collapsed: config.layer_control.collapsed }).addTo(map);
        }
    </script>
</body>
</html>
"#;
