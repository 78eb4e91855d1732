//! Leaflet page template for the rendered map.
//!
//! The page is self-contained apart from the Leaflet assets and OpenStreetMap
//! tiles it loads at view time. Placeholders are substituted by
//! `MapDocument::render`.

pub(crate) const CENTER_PLACEHOLDER: &str = "{{CENTER}}";
pub(crate) const ZOOM_PLACEHOLDER: &str = "{{ZOOM}}";
pub(crate) const MARKERS_PLACEHOLDER: &str = "{{MARKERS}}";

pub(crate) const MAP_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Clustered IP locations</title>

  <!-- Leaflet 1.9.4 -->
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css" crossorigin="anonymous"
    referrerpolicy="no-referrer" />
  <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js" crossorigin="anonymous"
    referrerpolicy="no-referrer"></script>

  <style>
    html, body { height: 100%; margin: 0; }
    #map { position: absolute; inset: 0; }
    .cluster-legend {
      background: rgba(255, 255, 255, .92);
      border-radius: 6px;
      padding: 6px 10px;
      font: 13px/1.5 sans-serif;
      box-shadow: 0 1px 5px rgba(0, 0, 0, .35);
    }
    .cluster-legend i {
      display: inline-block;
      width: 10px;
      height: 10px;
      margin-right: 6px;
      border-radius: 50%;
    }
  </style>
</head>
<body>
  <div id="map"></div>
  <script>
    const markers = {{MARKERS}};

    const map = L.map('map').setView({{CENTER}}, {{ZOOM}});
    L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
      maxZoom: 18,
      attribution: '&copy; OpenStreetMap contributors'
    }).addTo(map);

    const clusters = new Map();
    for (const m of markers) {
      L.circleMarker([m.lat, m.lon], {
        radius: 8,
        color: m.color,
        fillColor: m.color,
        fillOpacity: 0.75,
        weight: 2
      }).bindPopup(m.popup).addTo(map);
      const entry = clusters.get(m.cluster) || { color: m.color, count: 0 };
      entry.count += 1;
      clusters.set(m.cluster, entry);
    }

    const legend = L.control({ position: 'bottomright' });
    legend.onAdd = function () {
      const div = L.DomUtil.create('div', 'cluster-legend');
      const rows = [...clusters.entries()].sort((a, b) => a[0] - b[0]);
      div.innerHTML = rows
        .map(([cluster, e]) => `<i style="background:${e.color}"></i>cluster ${cluster} (${e.count})`)
        .join('<br>');
      return div;
    };
    if (clusters.size > 0) {
      legend.addTo(map);
    }
  </script>
</body>
</html>
"#;
