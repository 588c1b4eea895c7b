pub const INDEX: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>ESP32 LED Controller</title>
    <style>
        body { font-family: system-ui, sans-serif; background: #f3f4f6; display: flex; justify-content: center; padding: 40px 12px; }
        main { background: white; padding: 32px; border-radius: 16px; max-width: 420px; width: 100%; }
        .led { display: flex; justify-content: space-between; align-items: center; padding: 12px; margin: 8px 0; background: #f9fafb; border-radius: 8px; }
        .dot { display: inline-block; width: 18px; height: 18px; border-radius: 50%; background: #d1d5db; margin-right: 8px; vertical-align: middle; }
        .dot.on.yellow { background: #facc15; }
        .dot.on.blue { background: #3b82f6; }
        .dot.on.green { background: #22c55e; }
        .on-text { color: #16a34a; font-weight: bold; }
        .off-text { color: #dc2626; font-weight: bold; }
        button { width: 110px; padding: 8px; border: none; border-radius: 8px; color: white; background: #2563eb; cursor: pointer; }
        button:disabled { background: #9ca3af; cursor: not-allowed; }
        input { width: 100%; padding: 8px; box-sizing: border-box; }
        #busy { height: 24px; margin-top: 12px; color: #6b7280; text-align: center; }
        #toasts { position: fixed; bottom: 16px; right: 16px; }
        .toast { background: #1f2937; color: white; padding: 10px 16px; border-radius: 8px; margin-top: 8px; }
        code { background: #f3f4f6; padding: 1px 4px; }
    </style>
</head>
<body>
<main>
    <h1>ESP32 LED Controller</h1>
    <label for="address">ESP32 IP Address:</label>
    <input id="address" placeholder="e.g., 192.168.1.100">
    <div id="leds"></div>
    <div id="busy"></div>
    <h3>ESP32 Setup Guide</h3>
    <p>Your ESP32 must be on the same network and serve these endpoints for each LED color (yellow, blue, green):</p>
    <ul>
        <li><code>/led/{color}/on</code> - to turn the specific LED on.</li>
        <li><code>/led/{color}/off</code> - to turn the specific LED off.</li>
    </ul>
</main>
<div id="toasts"></div>
<script>
    let requestInFlight = false;

    function render(view) {
        const busy = view.busy || requestInFlight;
        document.getElementById('leds').innerHTML = view.leds.map(led => `
            <div class="led">
                <span><span class="dot ${led.color} ${led.status ? 'on' : ''}"></span>
                    ${led.color[0].toUpperCase() + led.color.slice(1)} LED:
                    <span class="${led.status ? 'on-text' : 'off-text'}">${led.status ? 'ON' : 'OFF'}</span>
                </span>
                <button onclick="toggleLed(${led.id})" ${busy ? 'disabled' : ''}>
                    ${led.status ? 'Turn OFF' : 'Turn ON'}
                </button>
            </div>`).join('');
        document.getElementById('busy').textContent = busy ? 'Sending command...' : '';
    }

    async function refresh() {
        const response = await fetch('/api/state');
        render(await response.json());
    }

    // The field only follows the server once; after that it shows what was typed.
    async function load() {
        const response = await fetch('/api/state');
        const view = await response.json();
        document.getElementById('address').value = view.device_address;
        render(view);
    }

    async function toggleLed(id) {
        requestInFlight = true;
        await refresh();
        try {
            const response = await fetch(`/api/leds/${id}/toggle`, { method: 'POST' });
            requestInFlight = false;
            if (response.ok) {
                render(await response.json());
            } else {
                await refresh();
            }
        } finally {
            requestInFlight = false;
        }
    }

    document.getElementById('address').addEventListener('input', event => {
        fetch('/api/address', {
            method: 'PUT',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({ address: event.target.value }),
        });
    });

    const events = new EventSource('/api/events');
    events.addEventListener('toast', event => {
        const toast = JSON.parse(event.data);
        const element = document.createElement('div');
        element.className = 'toast';
        element.textContent = toast.message;
        document.getElementById('toasts').appendChild(element);
        setTimeout(() => element.remove(), toast.duration_ms);
    });

    load();
</script>
</body>
</html>
"#;
